//! User lookup service, registered in the container under its trait name so
//! controllers can have it injected.

use std::sync::Arc;

use tinymvc::{erase, ComponentDef, ErasedInstance, InstantiationError, InterfaceBinding, Role};

use crate::models::User;

pub trait UserService: Send + Sync {
    fn get_user(&self) -> User;
}

/// In-memory implementation used by the sample.
#[derive(Default)]
pub struct SimpleUserService;

impl UserService for SimpleUserService {
    fn get_user(&self) -> User {
        User::new("Alice", "NYC")
    }
}

fn construct_user_service() -> Result<ErasedInstance, InstantiationError> {
    Ok(erase(Arc::new(SimpleUserService) as Arc<dyn UserService>))
}

inventory::submit! {
    ComponentDef {
        type_name: "tinymvc_demo::services::SimpleUserService",
        role: Some(Role::Service),
        service_name: None,
        construct: construct_user_service,
        interfaces: &[InterfaceBinding {
            name: "tinymvc_demo::services::UserService",
            construct: construct_user_service,
        }],
        injects: &[],
        prefix: "",
        routes: &[],
    }
}
