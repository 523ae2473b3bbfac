/// An optional host feature, checked before use
#[derive(Debug, Clone)]
pub enum Capability<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> Capability<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Capability::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    pub fn as_available(&self) -> Option<&T> {
        match self {
            Capability::Available(backend) => Some(backend),
            Capability::Unavailable { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Capability::Available(_) => None,
            Capability::Unavailable { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_accessors() {
        let yes: Capability<u8> = Capability::Available(3);
        assert!(yes.is_available());
        assert_eq!(yes.as_available(), Some(&3));
        assert!(yes.reason().is_none());

        let no: Capability<u8> = Capability::unavailable("not on this host");
        assert!(!no.is_available());
        assert!(no.as_available().is_none());
        assert_eq!(no.reason(), Some("not on this host"));
    }
}
