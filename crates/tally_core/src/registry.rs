use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

/// How tokens are counted for a model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountingScheme {
    /// Exact count through a named byte-pair encoding.
    Bpe(&'static str),
    /// Character-ratio estimate for families without a public encoding.
    Heuristic,
}

impl CountingScheme {
    pub fn is_exact(self) -> bool {
        matches!(self, CountingScheme::Bpe(_))
    }
}

/// One selectable entry of the model picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOption {
    pub label: &'static str,
    /// Scheme key; unique within a registry.
    pub value: &'static str,
    pub group: &'static str,
    pub scheme: CountingScheme,
}

impl ModelOption {
    pub const fn new(
        label: &'static str,
        value: &'static str,
        group: &'static str,
        scheme: CountingScheme,
    ) -> Self {
        Self {
            label,
            value,
            group,
            scheme,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("model registry is empty")]
    Empty,
    #[error("duplicate model key {0:?}")]
    DuplicateValue(String),
}

/// Ordered, immutable list of model options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRegistry {
    options: Vec<ModelOption>,
}

const DEFAULT_MODEL: &str = "gpt-4";

static BUILTIN: LazyLock<Arc<ModelRegistry>> = LazyLock::new(|| {
    use CountingScheme::{Bpe, Heuristic};

    Arc::new(ModelRegistry {
        options: vec![
            ModelOption::new("GPT-4o", "gpt-4o", "OpenAI", Bpe("o200k_base")),
            ModelOption::new("GPT-4o mini", "gpt-4o-mini", "OpenAI", Bpe("o200k_base")),
            ModelOption::new("o1 / o3", "o1", "OpenAI", Bpe("o200k_base")),
            ModelOption::new("GPT-4 / GPT-4 Turbo", "gpt-4", "OpenAI", Bpe("cl100k_base")),
            ModelOption::new("GPT-3.5 Turbo", "gpt-3.5-turbo", "OpenAI", Bpe("cl100k_base")),
            ModelOption::new(
                "text-embedding-3",
                "text-embedding-3",
                "OpenAI",
                Bpe("cl100k_base"),
            ),
            ModelOption::new(
                "text-davinci-003 / Codex",
                "text-davinci-003",
                "OpenAI (legacy)",
                Bpe("p50k_base"),
            ),
            ModelOption::new("GPT-3 davinci", "davinci", "OpenAI (legacy)", Bpe("r50k_base")),
            ModelOption::new("Claude", "claude", "Anthropic", Heuristic),
            ModelOption::new("Gemini", "gemini", "Google", Heuristic),
            ModelOption::new("Llama 3", "llama-3", "Meta", Heuristic),
            ModelOption::new("Mistral", "mistral", "Mistral AI", Heuristic),
        ],
    })
});

impl ModelRegistry {
    /// Builds a registry, rejecting empty lists and duplicate keys.
    pub fn new(options: Vec<ModelOption>) -> Result<Self, RegistryError> {
        let registry = Self { options };
        registry.validate()?;
        Ok(registry)
    }

    /// The registry shipped with the application.
    pub fn builtin() -> Arc<ModelRegistry> {
        Arc::clone(&BUILTIN)
    }

    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.options.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut seen = HashSet::with_capacity(self.options.len());
        for option in &self.options {
            if !seen.insert(option.value) {
                return Err(RegistryError::DuplicateValue(option.value.to_string()));
            }
        }
        Ok(())
    }

    pub fn options(&self) -> &[ModelOption] {
        &self.options
    }

    pub fn find(&self, key: &str) -> Option<&ModelOption> {
        self.options.iter().find(|option| option.value == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.options.iter().position(|option| option.value == key)
    }

    /// Distinct groups in first-seen order.
    pub fn groups(&self) -> Vec<&'static str> {
        let mut groups: Vec<&'static str> = Vec::new();
        for option in &self.options {
            if !groups.contains(&option.group) {
                groups.push(option.group);
            }
        }
        groups
    }

    /// Preferred initial selection: `gpt-4` when present, else the first row.
    pub fn default_key(&self) -> &'static str {
        self.find(DEFAULT_MODEL)
            .or_else(|| self.options.first())
            .map(|option| option.value)
            .unwrap_or(DEFAULT_MODEL)
    }
}
