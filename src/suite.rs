//! Nested test structure: scopes with before-each hooks and cases.
//!
//! Every case runs against a fresh [`TestContext`]. Before its body, the
//! hooks of every enclosing scope run outermost first, each scope's hooks in
//! the order they were registered.

use crate::config::HarnessConfig;
use crate::context::{MockSet, TestContext};
use crate::logging;
use crate::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

pub type Hook = Rc<dyn Fn(&mut TestContext) -> Result<()>>;
pub type TestBody = Rc<dyn Fn(&mut TestContext) -> Result<()>>;

struct HookEntry {
    label: String,
    run: Hook,
}

struct CaseEntry {
    name: String,
    body: TestBody,
}

struct ScopeNode {
    title: String,
    hooks: Vec<HookEntry>,
    cases: Vec<CaseEntry>,
    children: Vec<ScopeNode>,
}

impl ScopeNode {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            hooks: Vec::new(),
            cases: Vec::new(),
            children: Vec::new(),
        }
    }

    fn case_count(&self) -> usize {
        self.cases.len() + self.children.iter().map(ScopeNode::case_count).sum::<usize>()
    }
}

/// A describe block being populated.
pub struct Scope<'a> {
    node: &'a mut ScopeNode,
    declared: &'a MockSet,
}

impl<'a> Scope<'a> {
    pub fn title(&self) -> &str {
        &self.node.title
    }

    /// The collaborators the enclosing suite mocks.
    pub fn declared(&self) -> &MockSet {
        self.declared
    }

    /// Adds a nested scope populated by `body`. If `body` fails, the nested
    /// scope is discarded and the error is returned.
    pub fn describe<F>(&mut self, title: &str, body: F) -> Result<()>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<()>,
    {
        let mut node = ScopeNode::new(title);
        {
            let mut child = Scope {
                node: &mut node,
                declared: self.declared,
            };
            body(&mut child)?;
        }
        self.node.children.push(node);
        Ok(())
    }

    pub fn before_each<F>(&mut self, label: &str, hook: F)
    where
        F: Fn(&mut TestContext) -> Result<()> + 'static,
    {
        logging::log_hook_registered(&self.node.title, label);
        self.node.hooks.push(HookEntry {
            label: label.to_string(),
            run: Rc::new(hook),
        });
    }

    /// Like [`Scope::before_each`], but refuses to register the hook unless
    /// the suite declares every collaborator in `required`.
    pub fn before_each_requiring<F>(&mut self, label: &str, required: &[&str], hook: F) -> Result<()>
    where
        F: Fn(&mut TestContext) -> Result<()> + 'static,
    {
        self.declared.require(required)?;
        self.before_each(label, hook);
        Ok(())
    }

    pub fn it<F>(&mut self, name: &str, body: F)
    where
        F: Fn(&mut TestContext) -> Result<()> + 'static,
    {
        self.node.cases.push(CaseEntry {
            name: name.to_string(),
            body: Rc::new(body),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Titles of the enclosing scopes, outermost first.
    pub path: Vec<String>,
    pub name: String,
    #[serde(flatten)]
    pub status: CaseStatus,
}

impl CaseReport {
    pub fn full_name(&self) -> String {
        let mut parts = self.path.clone();
        parts.push(self.name.clone());
        parts.join(" ")
    }

    pub fn passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub suite: String,
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn case(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|c| c.name == name)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| HarnessError::ReportError(format!("Failed to serialize report: {}", e)))
    }
}

pub struct Suite {
    root: ScopeNode,
    mocks: MockSet,
    config: HarnessConfig,
}

impl Suite {
    pub fn new(name: &str, mocks: MockSet) -> Self {
        Self {
            root: ScopeNode::new(name),
            mocks,
            config: HarnessConfig::default(),
        }
    }

    pub fn with_config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.root.title
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn scope(&mut self) -> Scope<'_> {
        Scope {
            node: &mut self.root,
            declared: &self.mocks,
        }
    }

    pub fn describe<F>(&mut self, title: &str, body: F) -> Result<()>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<()>,
    {
        self.scope().describe(title, body)
    }

    pub fn case_count(&self) -> usize {
        self.root.case_count()
    }

    pub fn new_context(&self) -> TestContext {
        TestContext::new(&self.mocks, &self.config, &self.root.title)
    }

    /// Runs every case, installing the configured subscriber first.
    pub fn run(&self) -> SuiteReport {
        logging::init_tracing(&self.config.logging);
        logging::log_suite_start(&self.root.title, self.case_count());
        let mut cases = Vec::new();
        let mut hooks = Vec::new();
        let mut path = Vec::new();
        self.run_node(&self.root, &mut hooks, &mut path, &mut cases);

        let report = SuiteReport {
            suite: self.root.title.clone(),
            cases,
        };
        logging::log_suite_complete(&report.suite, report.passed(), report.failed());
        report
    }

    /// Runs the hooks for the first case named `case` and returns the
    /// resulting context without running the case body.
    pub fn arrange(&self, case: &str) -> Result<TestContext> {
        let mut hooks = Vec::new();
        if !Self::find_hooks(&self.root, case, &mut hooks) {
            return Err(HarnessError::UnknownCase(case.to_string()));
        }
        let mut ctx = self.new_context();
        for hook in hooks {
            logging::log_hook_run(case, &hook.label);
            (hook.run)(&mut ctx).map_err(|e| HarnessError::HookFailed {
                hook: hook.label.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(ctx)
    }

    fn find_hooks<'n>(node: &'n ScopeNode, case: &str, hooks: &mut Vec<&'n HookEntry>) -> bool {
        let depth = hooks.len();
        hooks.extend(node.hooks.iter());
        if node.cases.iter().any(|c| c.name == case) {
            return true;
        }
        for child in &node.children {
            if Self::find_hooks(child, case, hooks) {
                return true;
            }
        }
        hooks.truncate(depth);
        false
    }

    fn run_node<'n>(
        &self,
        node: &'n ScopeNode,
        hooks: &mut Vec<&'n HookEntry>,
        path: &mut Vec<String>,
        reports: &mut Vec<CaseReport>,
    ) {
        let depth = hooks.len();
        hooks.extend(node.hooks.iter());
        let is_root = std::ptr::eq(node, &self.root);
        if !is_root {
            path.push(node.title.clone());
        }

        for case in &node.cases {
            let status = match self.run_case(hooks, case) {
                Ok(()) => CaseStatus::Passed,
                Err(e) => CaseStatus::Failed {
                    error: e.to_string(),
                },
            };
            let report = CaseReport {
                path: path.clone(),
                name: case.name.clone(),
                status,
            };
            logging::log_case_complete(&report.full_name(), report.passed());
            reports.push(report);
        }

        for child in &node.children {
            self.run_node(child, hooks, path, reports);
        }

        if !is_root {
            path.pop();
        }
        hooks.truncate(depth);
    }

    fn run_case(&self, hooks: &[&HookEntry], case: &CaseEntry) -> Result<()> {
        let mut ctx = self.new_context();
        for hook in hooks {
            logging::log_hook_run(&case.name, &hook.label);
            if let Err(e) = guarded(|| (hook.run)(&mut ctx)) {
                logging::log_hook_failed(&case.name, &hook.label, &e.to_string());
                return Err(HarnessError::HookFailed {
                    hook: hook.label.clone(),
                    reason: e.to_string(),
                });
            }
        }
        guarded(|| (case.body)(&mut ctx))
    }
}

/// Turns a panic (a failed `assert!` in a test body) into an error.
fn guarded<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "test panicked".to_string());
            Err(HarnessError::TestFailed(message))
        }
    }
}
