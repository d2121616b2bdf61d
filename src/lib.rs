pub mod entity;
pub mod persistence;
pub mod planning;
pub mod render;
pub mod timeline;

pub use entity::{
    Activity, Entity, EntityError, Functionality, HorizontalAlign, Milestone, VerticalAlign,
};
pub use persistence::{
    load_timeline_from_csv, load_timeline_from_json, save_timeline_to_csv, save_timeline_to_json,
    PersistenceError, PersistenceResult,
};
pub use render::{render, RecordingSurface, RenderContext, RenderOptions, Surface, SvgSurface};
pub use timeline::Timeline;
