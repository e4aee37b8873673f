/// Where the shopper is in the cart/checkout flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutState {
    #[default]
    Idle,
    CartOpen,
    Confirmed,
}

/// Outcome of a checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Cart was empty; nothing changed.
    RejectedEmpty,
    Confirmed,
}

impl CheckoutState {
    pub fn open_cart(self) -> Self {
        Self::CartOpen
    }

    pub fn close_cart(self) -> Self {
        match self {
            Self::CartOpen => Self::Idle,
            other => other,
        }
    }

    pub fn close_success(self) -> Self {
        match self {
            Self::Confirmed => Self::Idle,
            other => other,
        }
    }

    pub fn after_checkout(self, outcome: CheckoutOutcome) -> Self {
        match outcome {
            CheckoutOutcome::RejectedEmpty => self,
            CheckoutOutcome::Confirmed => Self::Confirmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_happy_path_returns_to_idle() {
        let state = CheckoutState::default()
            .open_cart()
            .after_checkout(CheckoutOutcome::Confirmed);
        assert_eq!(state, CheckoutState::Confirmed);
        assert_eq!(state.close_success(), CheckoutState::Idle);
    }

    #[test]
    fn empty_checkout_keeps_cart_open() {
        let state = CheckoutState::CartOpen.after_checkout(CheckoutOutcome::RejectedEmpty);
        assert_eq!(state, CheckoutState::CartOpen);
    }

    #[test]
    fn closing_cart_does_not_dismiss_confirmation() {
        assert_eq!(
            CheckoutState::Confirmed.close_cart(),
            CheckoutState::Confirmed
        );
    }
}
