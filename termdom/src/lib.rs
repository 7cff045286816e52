pub mod buffer;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod hit;
pub mod layout;
pub mod markup;
pub mod render;
pub mod selector;
pub mod style;
pub mod terminal;
pub mod text;
pub mod types;

pub use buffer::{Buffer, Cell};
pub use document::{ClassList, Document, Lifecycle, NodeId};
pub use element::{Child, Element};
pub use error::{DomError, Result};
pub use event::{DispatchOutcome, Event, EventKind, Listener, ListenerId, MouseButton};
pub use hit::{hit_test, hit_test_any};
pub use layout::{layout, LayoutBox, LayoutResult, Rect};
pub use selector::Selector;
pub use style::{ComputedStyle, Style, StyleSheet};
pub use terminal::Terminal;
pub use types::*;
