pub use self::{app::App, runtime::Runtime};

mod app;
mod runtime;
