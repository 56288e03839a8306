//! Request dispatch
//!
//! Per request: match the path against the route table in registration
//! order, bind the handler's positional arguments from the request
//! parameters and the request/response sentinels, invoke the handler, and
//! render any returned view result. Every path through here terminates in a
//! written response; request-level failures never take the process down.

use tracing::{debug, error, warn};

use crate::error::{DispatchError, InvokeError};
use crate::http::{HttpResponse, RequestInfo, ResponseSink};
use crate::routing::{BindMap, Route, RouteTable};
use crate::component::ParamType;
use crate::view::TemplateRegistry;

/// One bound argument position. Unset positions read as zero values.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Unset,
    Text(String),
    Int(i64),
    /// Sentinel: this position is bound to the request object.
    Request,
    /// Sentinel: this position is bound to the response object.
    Response,
}

/// The positional argument array plus the request/response objects, handed
/// to the handler's invoke function.
pub struct CallArgs<'a> {
    slots: Vec<Arg>,
    request: &'a RequestInfo,
    response: &'a mut ResponseSink,
}

impl<'a> CallArgs<'a> {
    pub(crate) fn new(arity: usize, request: &'a RequestInfo, response: &'a mut ResponseSink) -> Self {
        Self {
            slots: vec![Arg::Unset; arity],
            request,
            response,
        }
    }

    pub(crate) fn set(&mut self, index: usize, arg: Arg) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = arg;
        }
    }

    pub(crate) fn is_unset(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Arg::Unset))
    }

    /// Text argument at a position; empty string when unset.
    pub fn text(&self, index: usize) -> &str {
        match self.slots.get(index) {
            Some(Arg::Text(value)) => value,
            _ => "",
        }
    }

    /// Integer argument at a position; zero when unset.
    pub fn int(&self, index: usize) -> i64 {
        match self.slots.get(index) {
            Some(Arg::Int(value)) => *value,
            _ => 0,
        }
    }

    pub fn arg(&self, index: usize) -> &Arg {
        self.slots.get(index).unwrap_or(&Arg::Unset)
    }

    /// The request object.
    pub fn request(&self) -> &RequestInfo {
        self.request
    }

    /// The response object, for handlers that write output directly.
    pub fn response(&mut self) -> &mut ResponseSink {
        self.response
    }
}

/// Convert one request parameter to the argument form its position expects.
///
/// Text passes through unchanged; integers parse (an unparsable value aborts
/// the request); any other declared type drops the parameter silently.
pub fn param_type_transfer(
    name: &str,
    value: &str,
    ty: ParamType,
) -> Result<Option<Arg>, DispatchError> {
    match ty {
        ParamType::Text => Ok(Some(Arg::Text(value.to_string()))),
        ParamType::Int => value
            .trim()
            .parse::<i64>()
            .map(|parsed| Some(Arg::Int(parsed)))
            .map_err(|_| DispatchError::BadParam {
                name: name.to_string(),
                value: value.to_string(),
            }),
        ParamType::Other => Ok(None),
    }
}

fn bind_args(
    bind: &BindMap,
    request: &RequestInfo,
    args: &mut CallArgs<'_>,
) -> Result<(), DispatchError> {
    for (name, value) in request.params() {
        let Some(index) = bind.query_position(name) else {
            continue;
        };
        // First occurrence of a name wins; multi-value binding is out of
        // scope.
        if !args.is_unset(index) {
            continue;
        }
        if let Some(arg) = param_type_transfer(name, value, bind.param_type(index))? {
            args.set(index, arg);
        }
    }
    // Sentinels win any collision with a query-derived value.
    if let Some(index) = bind.request_slot() {
        args.set(index, Arg::Request);
    }
    if let Some(index) = bind.response_slot() {
        args.set(index, Arg::Response);
    }
    Ok(())
}

/// Front controller: owns the prepared route table and template registry,
/// both read-only after startup and shared across request tasks.
pub struct Dispatcher {
    routes: RouteTable,
    templates: TemplateRegistry,
}

impl Dispatcher {
    pub fn new(routes: RouteTable, templates: TemplateRegistry) -> Self {
        Self { routes, templates }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Serve one request. Always produces a response: 200 with the handler
    /// output, 404 when no route matches, 500 with the failure chain when
    /// binding or invocation fails.
    pub fn dispatch(&self, request: &RequestInfo) -> HttpResponse {
        match self.try_dispatch(request) {
            Ok(body) => HttpResponse::text(body),
            Err(DispatchError::NotFound(path)) => {
                debug!(path = %path, "no route matched");
                HttpResponse::text("404 Not Found").status(404)
            }
            Err(err) => {
                error!(path = request.path(), error = %err, "dispatch failed");
                HttpResponse::text(format!("500 Exception, Msg: {}", failure_chain(&err)))
                    .status(500)
            }
        }
    }

    fn try_dispatch(&self, request: &RequestInfo) -> Result<String, DispatchError> {
        let route = self
            .routes
            .matched(request.path())
            .ok_or_else(|| DispatchError::NotFound(request.path().to_string()))?;

        let mut sink = ResponseSink::new();
        let view = self.invoke(route, request, &mut sink)?;

        if let Some(mv) = view {
            self.render(&mv, &mut sink);
        }
        Ok(sink.into_body())
    }

    fn invoke(
        &self,
        route: &Route,
        request: &RequestInfo,
        sink: &mut ResponseSink,
    ) -> Result<Option<crate::view::ModelAndView>, DispatchError> {
        let mut args = CallArgs::new(route.bind().arity(), request, sink);
        bind_args(route.bind(), request, &mut args)?;
        (route.def().invoke)(route.instance(), &mut args).map_err(DispatchError::Invoke)
    }

    /// Best-effort rendering: an unknown view identifier writes nothing, and
    /// a template I/O failure drops the output rather than failing the
    /// request.
    fn render(&self, mv: &crate::view::ModelAndView, sink: &mut ResponseSink) {
        let Some(resolver) = self.templates.resolve(mv.view()) else {
            warn!(view = mv.view(), "no template resolver matched, writing nothing");
            return;
        };
        match resolver.parse(mv) {
            Ok(rendered) => sink.write(rendered),
            Err(err) => warn!(view = mv.view(), error = %err, "template render failed"),
        }
    }
}

/// Flatten an error and its sources into the one-line message carried by
/// the 500 body.
fn failure_chain(err: &DispatchError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
