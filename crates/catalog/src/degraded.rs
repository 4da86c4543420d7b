/// A value that is always usable, plus the issue that forced a fallback (if any).
///
/// Operations that must never fail toward their caller return this instead of
/// `Result`: on failure `value` holds the empty/default result and `issue`
/// carries the diagnostic.
#[derive(Debug)]
pub struct Degraded<T, E> {
    pub value: T,
    pub issue: Option<E>,
}

impl<T, E> Degraded<T, E> {
    pub fn clean(value: T) -> Self {
        Self { value, issue: None }
    }

    pub fn fallback(value: T, issue: E) -> Self {
        Self { value, issue: Some(issue) }
    }

    pub fn is_degraded(&self) -> bool {
        self.issue.is_some()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Degraded<U, E> {
        Degraded { value: f(self.value), issue: self.issue }
    }
}

impl<T: Default, E> Degraded<T, E> {
    pub fn from_result(res: Result<T, E>) -> Self {
        match res {
            Ok(v) => Self::clean(v),
            Err(e) => Self::fallback(T::default(), e),
        }
    }
}

impl<T, E: std::fmt::Display> Degraded<T, E> {
    /// Log the issue (if any) and hand back the value.
    pub fn logged(self, what: &str) -> T {
        if let Some(issue) = &self.issue {
            tracing::error!(what, error = %issue, "degraded to fallback value");
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result_falls_back_to_default() {
        let d: Degraded<Vec<u8>, String> = Degraded::from_result(Err("boom".to_string()));
        assert!(d.is_degraded());
        assert!(d.value.is_empty());
        assert_eq!(d.issue.as_deref(), Some("boom"));

        let ok: Degraded<Vec<u8>, String> = Degraded::from_result(Ok(vec![1]));
        assert!(!ok.is_degraded());
        assert_eq!(ok.into_value(), vec![1]);
    }
}
