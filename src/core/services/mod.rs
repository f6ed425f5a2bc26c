pub mod resources;
pub mod traits;

pub use resources::{Resource, ResourceService};
pub use traits::{
    CreateService, DeleteService, GetService, ListParams, ListService, UpdateService,
};
