/// Go-related environment variables, captured once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentView {
    pub go_root: Option<String>,
    pub go_path: Option<String>,
    /// Only reported, never acted on.
    pub go_proxy: Option<String>,
}

impl EnvironmentView {
    /// Read `GOROOT`, `GOPATH` and `GOPROXY` from the process environment.
    /// Unset and empty variables are both treated as absent.
    pub fn capture() -> Self {
        Self {
            go_root: read_var("GOROOT"),
            go_path: read_var("GOPATH"),
            go_proxy: read_var("GOPROXY"),
        }
    }

    /// Fill variables missing from the environment with configured defaults.
    pub fn with_fallback(mut self, go_root: Option<&str>, go_path: Option<&str>) -> Self {
        if self.go_root.is_none() {
            self.go_root = non_empty(go_root);
        }
        if self.go_path.is_none() {
            self.go_path = non_empty(go_path);
        }
        self
    }
}

fn read_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
