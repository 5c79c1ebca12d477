//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants, particularly
//! for timers that must be cancellable.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::async_effect;
///
/// async_effect! {
///     let slides = source.fetch().await;
///     Some(CarouselAction::SlidesFetched { slides })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_millis(500),
///     action: CarouselAction::CooldownElapsed { token }
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

/// Create a cancellable `Effect::Delay` registered under an id
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::cancellable_delay;
///
/// cancellable_delay! {
///     id: AUTOPLAY,
///     duration: config.autoplay_interval,
///     action: CarouselAction::AutoplayTick { token }
/// }
/// ```
#[macro_export]
macro_rules! cancellable_delay {
    (
        id: $id:expr,
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $id,
            effect: ::std::boxed::Box::new($crate::delay! {
                duration: $duration,
                action: $action
            }),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::{Effect, EffectId};
    use std::time::Duration;

    #[derive(Clone, Debug)]
    enum TestAction {
        AsyncResult { value: i32 },
        TimeoutExpired,
    }

    #[test]
    fn test_async_effect_macro() {
        let effect = async_effect! {
            Some(TestAction::AsyncResult { value: 42 })
        };

        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn test_delay_macro() {
        let effect = delay! {
            duration: Duration::from_secs(30),
            action: TestAction::TimeoutExpired
        };

        assert!(matches!(effect, Effect::Delay { .. }));
    }

    #[test]
    fn test_cancellable_delay_macro() {
        let effect = cancellable_delay! {
            id: EffectId::new("timeout"),
            duration: Duration::from_millis(5),
            action: TestAction::TimeoutExpired
        };

        match effect {
            Effect::Cancellable { id, effect } => {
                assert_eq!(id.as_str(), "timeout");
                assert!(matches!(
                    *effect,
                    Effect::Delay { duration, .. } if duration == Duration::from_millis(5)
                ));
            },
            other => unreachable!("expected Effect::Cancellable, got {other:?}"),
        }
    }
}
