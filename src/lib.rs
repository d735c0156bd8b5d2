#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod solve;
pub mod state;
pub mod tools;

pub use app::CanvasApp;
pub use command::{Command, History};
pub use config::AppConfig;
pub use document::Document;
pub use element::{Element, ElementId, Shape};
pub use input::InputEvent;
pub use renderer::Renderer;
pub use state::{EditorContext, EditorState};
pub use tools::Tool;
