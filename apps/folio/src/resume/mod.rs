// Resume data layer: one-shot YAML parse, then pure derived views.

pub mod date;
pub mod models;
pub mod parser;
pub mod view;

pub use date::{format_date_range, Locale};
pub use models::Resume;
pub use parser::load_resume;
pub use view::{ResumeView, SkillsByCategory};
