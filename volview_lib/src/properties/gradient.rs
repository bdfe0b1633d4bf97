use std::{cell::Cell, fmt::Display, str::FromStr};

use super::{Signal, Subscription};

/// Gradient estimation used for shading in the ray caster
///
/// Integer codes are the values of the `gradientMethod` shader uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientMethod {
    /// Unshaded compositing
    None,
    CentralDifference,
    ForwardDifference,
    Sobel,
}

impl GradientMethod {
    pub const ALL: [GradientMethod; 4] = [
        GradientMethod::None,
        GradientMethod::CentralDifference,
        GradientMethod::ForwardDifference,
        GradientMethod::Sobel,
    ];

    pub fn code(&self) -> i32 {
        match self {
            GradientMethod::None => 0,
            GradientMethod::CentralDifference => 1,
            GradientMethod::ForwardDifference => 2,
            GradientMethod::Sobel => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<GradientMethod> {
        GradientMethod::ALL.into_iter().find(|m| m.code() == code)
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            GradientMethod::None => "none",
            GradientMethod::CentralDifference => "central",
            GradientMethod::ForwardDifference => "forward",
            GradientMethod::Sobel => "sobel",
        }
    }
}

impl Default for GradientMethod {
    fn default() -> Self {
        GradientMethod::CentralDifference
    }
}

impl Display for GradientMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get_name())
    }
}

impl FromStr for GradientMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GradientMethod::ALL
            .into_iter()
            .find(|m| m.get_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown gradient method '{s}'"))
    }
}

/// Observable gradient method
pub struct GradientProperty {
    method: Cell<GradientMethod>,
    changed: Signal<GradientMethod>,
}

impl GradientProperty {
    pub fn new(method: GradientMethod) -> Self {
        Self {
            method: Cell::new(method),
            changed: Signal::new(),
        }
    }

    pub fn method(&self) -> GradientMethod {
        self.method.get()
    }

    /// Returns `false` if the method did not change
    pub fn set_method(&self, method: GradientMethod) -> bool {
        if self.method.get() == method {
            return false;
        }
        self.method.set(method);
        tracing::debug!(%method, "Gradient method changed");
        self.changed.emit(&method);
        true
    }

    pub fn on_changed<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&GradientMethod) + 'static,
    {
        self.changed.connect(callback)
    }
}

impl Default for GradientProperty {
    fn default() -> Self {
        Self::new(GradientMethod::default())
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn codes_round_trip() {
        for method in GradientMethod::ALL {
            assert_eq!(GradientMethod::from_code(method.code()), Some(method));
        }
        assert_eq!(GradientMethod::from_code(17), None);
    }

    #[test]
    fn parse_names() {
        assert_eq!("Sobel".parse(), Ok(GradientMethod::Sobel));
        assert!("laplace".parse::<GradientMethod>().is_err());
    }

    #[test]
    fn property_notifies_new_method() {
        let property = GradientProperty::default();
        let last = std::rc::Rc::new(Cell::new(None));

        let last_clone = last.clone();
        let _s = property.on_changed(move |m| last_clone.set(Some(*m)));

        assert!(!property.set_method(GradientMethod::CentralDifference));
        assert_eq!(last.get(), None);
        assert!(property.set_method(GradientMethod::Sobel));
        assert_eq!(last.get(), Some(GradientMethod::Sobel));
        assert_eq!(property.method().code(), 3);
    }
}
