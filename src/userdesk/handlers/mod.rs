pub mod health;
pub use self::health::health;

pub mod pages;

pub mod proxy;
pub use self::proxy::ProxyRoute;
