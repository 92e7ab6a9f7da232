//! Web 界面
//!
//! 浏览器页面 + JSON API

mod page;
mod routes;

pub use routes::create_router;
