//! Per-route parameter bind map
//!
//! Built once at startup for each route: maps every bind key (a named
//! request parameter, or the request/response sentinel) to the positional
//! argument index of the handler. Positions with no bind key receive no
//! injected value and read as zero values at call time.

use std::collections::HashMap;

use crate::component::{ParamBind, ParamDef, ParamType};

#[derive(Debug)]
pub struct BindMap {
    query: HashMap<&'static str, usize>,
    request_slot: Option<usize>,
    response_slot: Option<usize>,
    params: &'static [ParamDef],
}

impl BindMap {
    pub fn build(params: &'static [ParamDef]) -> Self {
        let mut query = HashMap::new();
        let mut request_slot = None;
        let mut response_slot = None;
        for (index, param) in params.iter().enumerate() {
            match param.bind {
                ParamBind::Query(name) => {
                    query.insert(name, index);
                }
                ParamBind::Request => request_slot = Some(index),
                ParamBind::Response => response_slot = Some(index),
                ParamBind::Unbound => {}
            }
        }
        Self {
            query,
            request_slot,
            response_slot,
            params,
        }
    }

    /// Number of formal parameter positions.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Position bound to a named request parameter.
    pub fn query_position(&self, name: &str) -> Option<usize> {
        self.query.get(name).copied()
    }

    /// Position bound to the request object, if declared.
    pub fn request_slot(&self) -> Option<usize> {
        self.request_slot
    }

    /// Position bound to the response object, if declared.
    pub fn response_slot(&self) -> Option<usize> {
        self.response_slot
    }

    /// Declared type of a position; `Other` past the end.
    pub fn param_type(&self, index: usize) -> ParamType {
        self.params.get(index).map(|p| p.ty).unwrap_or(ParamType::Other)
    }
}
