pub mod actions;
pub mod component_context;
pub mod components;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod event_loop;
pub mod geometry;
pub mod icons;
pub mod keybindings;
pub mod links;
pub mod runner;
pub mod store;
pub mod taskbar;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
