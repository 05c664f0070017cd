use crate::class::Class;
use crate::error::InvalidConfig;

/// Queue strategy for waiters of a given class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueStrategy {
    /// First In, First Out - waiters are served in the order they arrive.
    Fifo,
    /// Last In, First Out - waiters are served in reverse order of arrival.
    Lifo,
}

/// How the occupying class treats arrivals while the other class is waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdmissionPolicy {
    /// Same-class actors keep entering while slots are free, even if the
    /// other class is queued. Alternation only applies at drain events.
    #[default]
    Greedy,
    /// Once the other class has a waiter, the occupying class stops
    /// admitting newcomers and refilling freed slots, so the pool drains
    /// and hands off.
    YieldToWaiting,
}

/// A rule for determining queue strategy based on class.
#[derive(Debug, Clone)]
pub(crate) enum StrategyRule {
    /// Default strategy for all classes not matched by other rules.
    Default(QueueStrategy),
    /// Strategy for a single class.
    Exact(Class, QueueStrategy),
}

/// Configuration for a [`ResourcePool`](crate::ResourcePool).
///
/// # Examples
///
/// ```rust
/// use garage_arbiter::{Class, PoolConfig, QueueStrategy};
///
/// let config = PoolConfig::new(3)
///     .default_strategy(QueueStrategy::Fifo)
///     .strategy(Class::Truck, QueueStrategy::Lifo);
///
/// assert_eq!(config.strategy_for_class(Class::Car), QueueStrategy::Fifo);
/// assert_eq!(config.strategy_for_class(Class::Truck), QueueStrategy::Lifo);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub(crate) capacity: usize,
    pub(crate) rules: Vec<StrategyRule>,
    pub(crate) admission: AdmissionPolicy,
}

impl PoolConfig {
    /// Create a configuration for a pool with `capacity` slots.
    ///
    /// Defaults: FIFO queues for both classes and [`AdmissionPolicy::Greedy`].
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            rules: Vec::new(),
            admission: AdmissionPolicy::Greedy,
        }
    }

    /// Set the default queue strategy for classes not matched by other rules.
    pub fn default_strategy(mut self, strategy: QueueStrategy) -> Self {
        self.rules.push(StrategyRule::Default(strategy));
        self
    }

    /// Set the queue strategy for one class.
    pub fn strategy(mut self, class: Class, strategy: QueueStrategy) -> Self {
        self.rules.push(StrategyRule::Exact(class, strategy));
        self
    }

    /// Set the admission policy.
    pub fn admission_policy(mut self, policy: AdmissionPolicy) -> Self {
        self.admission = policy;
        self
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check the configuration before a pool is built from it.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.capacity == 0 {
            return Err(InvalidConfig::ZeroCapacity);
        }
        if self.capacity > crate::ResourcePool::MAX_CAPACITY {
            return Err(InvalidConfig::CapacityTooLarge(self.capacity));
        }
        Ok(())
    }

    /// Resolve the queue strategy for a class.
    ///
    /// Exact rules win over defaults; among several rules of the same
    /// kind the last one wins.
    pub(crate) fn resolve_strategy(&self, class: Class) -> QueueStrategy {
        let mut default_strategy = QueueStrategy::Fifo;
        let mut exact = None;

        for rule in &self.rules {
            match rule {
                StrategyRule::Exact(c, strategy) if *c == class => exact = Some(*strategy),
                StrategyRule::Default(strategy) => default_strategy = *strategy,
                _ => {}
            }
        }

        exact.unwrap_or(default_strategy)
    }

    /// Returns the queue strategy that waiters of `class` will use.
    pub fn strategy_for_class(&self, class: Class) -> QueueStrategy {
        self.resolve_strategy(class)
    }

    /// Returns the configured admission policy.
    pub fn policy(&self) -> AdmissionPolicy {
        self.admission
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PoolConfig::new(2);
        assert_eq!(config.resolve_strategy(Class::Car), QueueStrategy::Fifo);
        assert_eq!(config.resolve_strategy(Class::Truck), QueueStrategy::Fifo);
        assert_eq!(config.policy(), AdmissionPolicy::Greedy);
        assert_eq!(config.capacity(), 2);
    }

    #[test]
    fn test_exact_match() {
        let config = PoolConfig::new(2)
            .default_strategy(QueueStrategy::Fifo)
            .strategy(Class::Car, QueueStrategy::Lifo);

        assert_eq!(config.resolve_strategy(Class::Car), QueueStrategy::Lifo);
        assert_eq!(config.resolve_strategy(Class::Truck), QueueStrategy::Fifo);
    }

    #[test]
    fn test_exact_overrides_later_default() {
        let config = PoolConfig::new(2)
            .strategy(Class::Truck, QueueStrategy::Fifo)
            .default_strategy(QueueStrategy::Lifo);

        assert_eq!(config.resolve_strategy(Class::Truck), QueueStrategy::Fifo);
        assert_eq!(config.resolve_strategy(Class::Car), QueueStrategy::Lifo);
    }

    #[test]
    fn test_last_rule_wins() {
        let config = PoolConfig::new(2)
            .strategy(Class::Car, QueueStrategy::Lifo)
            .strategy(Class::Car, QueueStrategy::Fifo);

        assert_eq!(config.resolve_strategy(Class::Car), QueueStrategy::Fifo);
    }

    #[test]
    fn test_validate() {
        assert_eq!(PoolConfig::new(0).validate(), Err(InvalidConfig::ZeroCapacity));
        assert!(PoolConfig::new(1).validate().is_ok());

        let too_large = crate::ResourcePool::MAX_CAPACITY + 1;
        assert_eq!(
            PoolConfig::new(too_large).validate(),
            Err(InvalidConfig::CapacityTooLarge(too_large))
        );
    }
}
