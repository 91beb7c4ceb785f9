/// Mutable state carried across every command of one translation session.
///
/// Counters only grow, so synthetic labels stay unique across all files
/// translated into the same output.
#[derive(Debug, Default, Clone)]
pub struct TranslationContext {
    function: Option<String>,
    file: String,
    compare_id: usize,
    return_id: usize,
}

impl TranslationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Function whose body is being translated, if any.
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    pub fn enter_function(&mut self, name: &str) {
        self.function = Some(name.to_string());
    }

    /// Static namespace of the file being translated.
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn enter_file(&mut self, stem: &str) {
        self.file = stem.to_string();
    }

    pub fn next_compare_id(&mut self) -> usize {
        let tmp = self.compare_id;
        self.compare_id += 1;
        tmp
    }

    pub fn next_return_id(&mut self) -> usize {
        let tmp = self.return_id;
        self.return_id += 1;
        tmp
    }
}
