//! Sample controller showing the two handler shapes: a view-returning route
//! and a route that writes straight to the response.

use std::sync::Arc;

use tinymvc::{
    downcast, erase, expect_instance, CallArgs, ComponentDef, ErasedInstance, Inject,
    InjectSlot, InstantiationError, InvokeError, ModelAndView, ParamBind, ParamDef, ParamType,
    Role, RouteDef,
};

use crate::services::UserService;

#[derive(Default)]
pub struct UserController {
    user_service: Inject<dyn UserService>,
}

impl UserController {
    /// `GET /web/hello.json` renders `template.fantj` from the stored user.
    pub fn hello(&self) -> Result<ModelAndView, InvokeError> {
        let service = self
            .user_service
            .get()
            .ok_or_else(|| InvokeError::handler("UserService is not wired"))?;
        let user = service.get_user();
        Ok(ModelAndView::new("template.fantj")
            .with("name", user.name)
            .with("addr", user.addr))
    }

    /// `GET /web/greet.json?name=..&age=..` writes plain text to the response.
    pub fn greet(&self, name: &str, age: i64) -> String {
        format!("hello {name}, age {age}")
    }
}

fn construct_user_controller() -> Result<ErasedInstance, InstantiationError> {
    Ok(erase(Arc::new(UserController::default())))
}

fn assign_user_service(target: &ErasedInstance, dep: &ErasedInstance) -> bool {
    let (Some(controller), Some(service)) = (
        downcast::<UserController>(target),
        downcast::<dyn UserService>(dep),
    ) else {
        return false;
    };
    controller.user_service.set(service);
    true
}

fn invoke_hello(
    instance: &ErasedInstance,
    _args: &mut CallArgs<'_>,
) -> Result<Option<ModelAndView>, InvokeError> {
    let controller = expect_instance::<UserController>(instance)?;
    controller.hello().map(Some)
}

fn invoke_greet(
    instance: &ErasedInstance,
    args: &mut CallArgs<'_>,
) -> Result<Option<ModelAndView>, InvokeError> {
    let controller = expect_instance::<UserController>(instance)?;
    let greeting = controller.greet(args.text(0), args.int(1));
    args.response().write(greeting);
    Ok(None)
}

inventory::submit! {
    ComponentDef {
        type_name: "tinymvc_demo::controllers::UserController",
        role: Some(Role::Controller),
        service_name: None,
        construct: construct_user_controller,
        interfaces: &[],
        injects: &[InjectSlot {
            name: "",
            type_name: "tinymvc_demo::services::UserService",
            assign: assign_user_service,
        }],
        prefix: "/web",
        routes: &[
            RouteDef {
                path: "/hello.json",
                params: &[],
                invoke: invoke_hello,
            },
            RouteDef {
                path: "/greet.json",
                params: &[
                    ParamDef {
                        bind: ParamBind::Query("name"),
                        ty: ParamType::Text,
                    },
                    ParamDef {
                        bind: ParamBind::Query("age"),
                        ty: ParamType::Int,
                    },
                    ParamDef {
                        bind: ParamBind::Response,
                        ty: ParamType::Other,
                    },
                ],
                invoke: invoke_greet,
            },
        ],
    }
}
