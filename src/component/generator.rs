use crate::error::GenerateError;

/// Variable names the compiler assigns to one node.
///
/// `input` is the output variable of the node's primary upstream, `output`
/// is the node's own variable. Generators must only reference these names,
/// or helper names derived from `output`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bindings<'a> {
    pub input: Option<&'a str>,
    pub output: Option<&'a str>,
}

impl<'a> Bindings<'a> {
    pub fn new(input: Option<&'a str>, output: Option<&'a str>) -> Self {
        Self { input, output }
    }

    pub fn input(&self) -> Result<&'a str, GenerateError> {
        self.input.ok_or(GenerateError::MissingBinding("input"))
    }

    pub fn output(&self) -> Result<&'a str, GenerateError> {
        self.output.ok_or(GenerateError::MissingBinding("output"))
    }
}

/// Defines the contract for turning one typed component configuration into code.
///
/// All three methods are pure: identical configuration and bindings always
/// produce identical output.
pub trait CodeGenerator {
    /// External libraries the generated code needs at runtime.
    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    /// Suffixes of the helper variables the body derives from its output
    /// variable, e.g. `_Engine` for `<output>_Engine`. The compiler keeps
    /// these names free of collisions too.
    fn helper_suffixes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Import statements the generated body relies on.
    fn imports(&self) -> Vec<String>;

    /// The code body of the node.
    fn generate(&self, bindings: &Bindings<'_>) -> Result<String, GenerateError>;
}
