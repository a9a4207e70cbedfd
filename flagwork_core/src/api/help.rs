use crate::constant::*;

/// Produces the names segment of a help line from the flag's names and its placeholder (empty for switches).
pub type Prefixer = Box<dyn Fn(&[&str], &str) -> String>;

/// How environment variable names are shown in help text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvSyntax {
    /// `[$NAME]`
    Posix,
    /// `[%NAME%]`
    Windows,
}

impl Default for EnvSyntax {
    fn default() -> Self {
        if cfg!(windows) {
            EnvSyntax::Windows
        } else {
            EnvSyntax::Posix
        }
    }
}

/// Everything the help text of a single flag is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub(crate) names: Vec<String>,
    pub(crate) usage: String,
    pub(crate) takes_value: bool,
    pub(crate) default_text: Option<String>,
    pub(crate) env_vars: Vec<String>,
}

impl HelpEntry {
    /// The flag's names, primary first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The usage, with any backticks still in place.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Whether the flag is followed by a value (ie: is not a switch).
    pub fn takes_value(&self) -> bool {
        self.takes_value
    }

    /// The rendered default, if there is one worth showing.
    pub fn default_text(&self) -> Option<&str> {
        self.default_text.as_deref()
    }

    /// The environment variables the flag falls back to.
    pub fn env_vars(&self) -> &[String] {
        &self.env_vars
    }
}

/// Renders [`HelpEntry`]s as `--name value, -n value<TAB>usage (default: X) [$ENV]`.
pub struct Renderer {
    prefixer: Prefixer,
    env_syntax: EnvSyntax,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("env_syntax", &self.env_syntax)
            .finish()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            prefixer: Box::new(prefixed_names),
            env_syntax: EnvSyntax::default(),
        }
    }
}

impl Renderer {
    /// Replace how the names segment is produced.
    pub fn with_prefixer(mut self, prefixer: impl Fn(&[&str], &str) -> String + 'static) -> Self {
        self.prefixer = Box::new(prefixer);
        self
    }

    /// Choose the environment variable syntax, rather than that of the compile target.
    pub fn with_env_syntax(mut self, env_syntax: EnvSyntax) -> Self {
        self.env_syntax = env_syntax;
        self
    }

    /// Render the help line for `entry`.
    pub fn render(&self, entry: &HelpEntry) -> String {
        let (placeholder, usage) = unquote_usage(&entry.usage);
        let placeholder = if entry.takes_value {
            placeholder.as_str()
        } else {
            ""
        };
        let names: Vec<&str> = entry.names.iter().map(String::as_str).collect();
        let prefix = (self.prefixer)(&names, placeholder);
        let mut line = format!(
            "{prefix}\t{}",
            with_default(&usage, entry.default_text.as_deref())
        );

        if !entry.env_vars.is_empty() {
            line.push_str(&env_hint(&entry.env_vars, self.env_syntax));
        }

        line
    }
}

/// The default names segment: `-` before single character names, `--` before the rest, each followed by the placeholder.
pub fn prefixed_names(names: &[&str], placeholder: &str) -> String {
    names
        .iter()
        .map(|name| {
            let prefix = if name.chars().count() == 1 {
                SHORT_PREFIX
            } else {
                LONG_PREFIX
            };

            if placeholder.is_empty() {
                format!("{prefix}{name}")
            } else {
                format!("{prefix}{name} {placeholder}")
            }
        })
        .collect::<Vec<String>>()
        .join(", ")
}

/// Split the first backtick quoted word out of `usage`, returning it (or `value`) and the usage without the backticks.
pub(crate) fn unquote_usage(usage: &str) -> (String, String) {
    if let Some(start) = usage.find('`') {
        if let Some(length) = usage[start + 1..].find('`') {
            let end = start + 1 + length;
            let placeholder = &usage[start + 1..end];
            let unquoted = format!("{}{placeholder}{}", &usage[..start], &usage[end + 1..]);
            return (placeholder.to_string(), unquoted);
        }
    }

    (DEFAULT_PLACEHOLDER.to_string(), usage.to_string())
}

pub(crate) fn with_default(usage: &str, default_text: Option<&str>) -> String {
    match default_text {
        Some(text) => format!("{usage} (default: {text})").trim().to_string(),
        None => usage.trim().to_string(),
    }
}

fn env_hint(env_vars: &[String], env_syntax: EnvSyntax) -> String {
    let names: Vec<String> = env_vars
        .iter()
        .map(|name| match env_syntax {
            EnvSyntax::Posix => format!("${name}"),
            EnvSyntax::Windows => format!("%{name}%"),
        })
        .collect();
    format!(" [{}]", names.join(", "))
}
