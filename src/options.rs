#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberCoercion {
    /// Integer targets also accept floats holding an exact integral value.
    #[default]
    Integral,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchOptions {
    pub numbers: NumberCoercion,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self::default().with_numbers(NumberCoercion::Strict)
    }

    pub fn with_numbers(mut self, numbers: NumberCoercion) -> Self {
        self.numbers = numbers;
        self
    }

    pub(crate) fn allows_integral_floats(&self) -> bool {
        self.numbers == NumberCoercion::Integral
    }
}
