//! Argument-matched responses.
//!
//! A [`ResponseTable`] is an ordered list of rules. Each rule pairs a list of
//! positional argument matchers with a response; the first rule whose
//! matchers all accept the call's arguments wins, otherwise the table's
//! default response is used. Tables are plain data so they can be inspected
//! and compared in tests.

use crate::error::{MockError, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgMatcher {
    Any,
    Eq(Value),
}

impl ArgMatcher {
    pub fn matches(&self, arg: &Value) -> bool {
        match self {
            ArgMatcher::Any => true,
            ArgMatcher::Eq(expected) => expected == arg,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Constant(Value),
    /// Echo the argument at this position.
    Arg(usize),
    Tuple(Vec<Response>),
}

impl Response {
    pub fn evaluate(&self, method: &str, args: &[Value]) -> Result<Value> {
        match self {
            Response::Constant(value) => Ok(value.clone()),
            Response::Arg(index) => {
                args.get(*index)
                    .cloned()
                    .ok_or_else(|| MockError::ArgumentOutOfRange {
                        method: method.to_string(),
                        index: *index,
                        len: args.len(),
                    })
            }
            Response::Tuple(parts) => parts
                .iter()
                .map(|part| part.evaluate(method, args))
                .collect::<Result<Vec<_>>>()
                .map(Value::Tuple),
        }
    }
}

impl From<Value> for Response {
    fn from(value: Value) -> Self {
        Response::Constant(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub matchers: Vec<ArgMatcher>,
    pub response: Response,
}

impl Rule {
    /// Matchers are positional. Arguments beyond the last matcher are
    /// unconstrained; a matcher with no corresponding argument never matches.
    pub fn matches(&self, args: &[Value]) -> bool {
        self.matchers.len() <= args.len()
            && self
                .matchers
                .iter()
                .zip(args)
                .all(|(matcher, arg)| matcher.matches(arg))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTable {
    rules: Vec<Rule>,
    default: Response,
}

impl ResponseTable {
    pub fn with_default(default: impl Into<Response>) -> Self {
        Self {
            rules: Vec::new(),
            default: default.into(),
        }
    }

    pub fn when(mut self, matchers: Vec<ArgMatcher>, response: impl Into<Response>) -> Self {
        self.rules.push(Rule {
            matchers,
            response: response.into(),
        });
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn default_response(&self) -> &Response {
        &self.default
    }

    /// Index of the first rule accepting `args`, or `None` if the default applies.
    pub fn matching_rule(&self, args: &[Value]) -> Option<usize> {
        self.rules.iter().position(|rule| rule.matches(args))
    }

    pub fn resolve(&self, method: &str, args: &[Value]) -> Result<Value> {
        let response = match self.matching_rule(args) {
            Some(index) => &self.rules[index].response,
            None => &self.default,
        };
        response.evaluate(method, args)
    }
}
