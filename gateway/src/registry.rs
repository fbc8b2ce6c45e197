//! Route registry: path templates and the (verb, path) lookup table.
//!
//! Templates are segmented on `/`; a `{name}` segment matches exactly
//! one non-empty concrete segment and binds it by name. Matching is
//! purely structural. Where several templates match the same concrete
//! path (`/pet/findByStatus` vs `/pet/{petId}`), the most literal one
//! wins: a literal segment outranks a placeholder at the first
//! position where the templates differ.

use std::collections::HashMap;

use anyhow::bail;
use error::{GatewayError, Result};
use percent_encoding::percent_decode_str;
use schema::Rpc;

/// Path variables extracted by a successful match.
pub type PathVars = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed path template, e.g. `/store/order/{orderId}`.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn parse(template: &str) -> Self {
        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if let Some(name) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Segment::Param(name.to_string())
                } else {
                    Segment::Literal(s.to_string())
                }
            })
            .collect();
        Self {
            raw: template.to_string(),
            segments,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Match a concrete path, already split into segments.
    fn matches(&self, path: &[&str]) -> Option<PathVars> {
        if path.len() != self.segments.len() {
            return None;
        }
        let mut vars = PathVars::new();
        for (segment, concrete) in self.segments.iter().zip(path) {
            match segment {
                Segment::Literal(literal) if literal == concrete => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    vars.insert(name.clone(), concrete.to_string());
                }
            }
        }
        Some(vars)
    }

    /// Two templates are structurally ambiguous when every concrete
    /// path matching one matches the other with equal specificity:
    /// same length, equal literals, placeholders in the same positions.
    fn is_ambiguous_with(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| match (a, b) {
                    (Segment::Literal(x), Segment::Literal(y)) => x == y,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Literal segments outrank placeholders at the first differing
    /// position. Only meaningful for templates of equal length.
    fn specificity_cmp(&self, other: &Self) -> std::cmp::Ordering {
        for (a, b) in self.segments.iter().zip(&other.segments) {
            match (a, b) {
                (Segment::Literal(_), Segment::Param(_)) => return std::cmp::Ordering::Greater,
                (Segment::Param(_), Segment::Literal(_)) => return std::cmp::Ordering::Less,
                _ => {}
            }
        }
        std::cmp::Ordering::Equal
    }
}

struct Route {
    rpc: Rpc,
    template: PathTemplate,
}

/// Immutable table of all registered RPC bindings.
///
/// Built once at startup and shared read-only across request handlers;
/// ambiguous contracts are rejected here, never at request time.
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Build the table for the whole petstore contract.
    pub fn with_contract() -> anyhow::Result<Self> {
        let mut table = Self::new();
        for rpc in Rpc::ALL {
            table.register(rpc)?;
        }
        Ok(table)
    }

    /// Register one binding. Fatal at startup if it collides with an
    /// already-registered one for the same verb.
    pub fn register(&mut self, rpc: Rpc) -> anyhow::Result<()> {
        let template = PathTemplate::parse(rpc.path_template());
        for existing in &self.routes {
            if existing.rpc.verb() == rpc.verb()
                && existing.template.is_ambiguous_with(&template)
            {
                bail!(
                    "ambiguous binding: {} {} ({}) collides with {}",
                    rpc.verb(),
                    rpc.path_template(),
                    rpc.name(),
                    existing.rpc.name()
                );
            }
        }
        self.routes.push(Route { rpc, template });
        Ok(())
    }

    /// Resolve a concrete (verb, path) pair to exactly one binding and
    /// its extracted path variables. Segments are percent-decoded
    /// before matching, so `/user/a%40b` binds the variable `a@b`.
    pub fn resolve(&self, verb: &str, path: &str) -> Result<(Rpc, PathVars)> {
        let decoded: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect();
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

        let mut best: Option<(&Route, PathVars)> = None;
        for route in &self.routes {
            if route.rpc.verb() != verb {
                continue;
            }
            let Some(vars) = route.template.matches(&segments) else {
                continue;
            };
            best = match best {
                Some((current, _))
                    if current.template.specificity_cmp(&route.template)
                        != std::cmp::Ordering::Less =>
                {
                    best
                }
                _ => Some((route, vars)),
            };
        }

        match best {
            Some((route, vars)) => Ok((route.rpc, vars)),
            None => Err(GatewayError::RouteNotFound {
                verb: verb.to_string(),
                path: path.to_string(),
            }),
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}
