// Service Registry
// Collects the services a provider needs wired into the host's container

use std::any::{type_name, TypeId};
use std::fmt;
use tracing::debug;

/// How long a resolved service instance lives in the host's container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceLifetime {
    Singleton,
    Scoped,
    Transient,
}

/// Identity of a service type
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceType {
    id: TypeId,
    name: &'static str,
}

impl ServiceType {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Debug for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A service to make available and the type that provides it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub service_type: ServiceType,
    pub implementation_type: ServiceType,
    pub lifetime: ServiceLifetime,
}

impl ServiceDescriptor {
    pub fn new<S: ?Sized + 'static, I: 'static>(lifetime: ServiceLifetime) -> Self {
        Self {
            service_type: ServiceType::of::<S>(),
            implementation_type: ServiceType::of::<I>(),
            lifetime,
        }
    }

    pub fn singleton<S: ?Sized + 'static, I: 'static>() -> Self {
        Self::new::<S, I>(ServiceLifetime::Singleton)
    }

    pub fn scoped<S: ?Sized + 'static, I: 'static>() -> Self {
        Self::new::<S, I>(ServiceLifetime::Scoped)
    }

    pub fn transient<S: ?Sized + 'static, I: 'static>() -> Self {
        Self::new::<S, I>(ServiceLifetime::Transient)
    }
}

/// Append-only target for service registrations
pub trait ServiceSink {
    /// Append a registration
    fn register(&mut self, descriptor: ServiceDescriptor);
}

/// Ordered list of service registrations
#[derive(Debug, Clone, Default)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a service is registered
    pub fn contains_service<T: ?Sized + 'static>(&self) -> bool {
        self.descriptors.iter().any(|d| d.service_type.is::<T>())
    }

    /// Get the first registration for a service
    pub fn find<T: ?Sized + 'static>(&self) -> Option<&ServiceDescriptor> {
        self.descriptors.iter().find(|d| d.service_type.is::<T>())
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Registrations in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.descriptors.iter()
    }
}

impl ServiceSink for ServiceCollection {
    fn register(&mut self, descriptor: ServiceDescriptor) {
        debug!(
            service = descriptor.service_type.name(),
            lifetime = ?descriptor.lifetime,
            "Registered service"
        );
        self.descriptors.push(descriptor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Store {}
    struct MockStore;
    impl Store for MockStore {}
    struct OtherStore;

    #[test]
    fn test_register_service() {
        let mut services = ServiceCollection::new();
        services.register(ServiceDescriptor::scoped::<MockStore, MockStore>());

        assert!(services.contains_service::<MockStore>());
        assert!(!services.contains_service::<OtherStore>());
        assert_eq!(services.len(), 1);
    }

    #[test]
    fn test_register_trait_service() {
        let mut services = ServiceCollection::new();
        services.register(ServiceDescriptor::singleton::<dyn Store, MockStore>());

        let descriptor = services.find::<dyn Store>().unwrap();
        assert!(descriptor.implementation_type.is::<MockStore>());
        assert_eq!(descriptor.lifetime, ServiceLifetime::Singleton);
    }

    #[test]
    fn test_register_keeps_duplicates_in_order() {
        let mut services = ServiceCollection::new();
        services.register(ServiceDescriptor::scoped::<MockStore, MockStore>());
        services.register(ServiceDescriptor::transient::<MockStore, MockStore>());

        let lifetimes: Vec<_> = services.iter().map(|d| d.lifetime).collect();
        assert_eq!(lifetimes, vec![ServiceLifetime::Scoped, ServiceLifetime::Transient]);
        assert_eq!(services.find::<MockStore>().unwrap().lifetime, ServiceLifetime::Scoped);
    }

    #[test]
    fn test_service_type_name() {
        let service = ServiceType::of::<MockStore>();
        assert!(service.name().ends_with("MockStore"));
        assert!(service.is::<MockStore>());
    }
}
