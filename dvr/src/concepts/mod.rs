pub mod interface;
pub mod packet;
pub mod route;
