pub mod app;
pub mod component;
pub mod config;
pub mod container;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod routing;
pub mod server;
pub mod view;

pub use app::AppContext;
pub use component::{
    downcast, erase, expect_instance, ComponentDef, ComponentSet, ErasedInstance, InjectSlot,
    InterfaceBinding, ParamBind, ParamDef, ParamType, Role, RouteDef,
};
pub use config::Config;
pub use container::{Container, Inject};
pub use dispatch::{Arg, CallArgs, Dispatcher};
pub use error::{
    ConfigError, DiscoveryError, DispatchError, InstantiationError, InvokeError, RenderError,
    RouteError, StartupError,
};
pub use http::{HttpResponse, Method, RequestInfo, ResponseSink};
pub use routing::RouteTable;
pub use server::Server;
pub use view::{ModelAndView, TemplateRegistry};
