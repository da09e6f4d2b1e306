//! Disposal bookkeeping for resources that must be released exactly once

/// A resource with an explicit release step (GPU buffers, programs, surfaces)
pub trait Disposable {
    fn dispose(&mut self);
}

/// Owns a resource and guarantees `dispose` runs exactly once: either on an
/// explicit [`Owned::dispose`] call or when the guard is dropped.
pub struct Owned<T: Disposable> {
    label: &'static str,
    resource: Option<T>,
}

impl<T: Disposable> Owned<T> {
    pub fn new(label: &'static str, resource: T) -> Self {
        Self {
            label,
            resource: Some(resource),
        }
    }

    /// `None` once disposed
    pub fn get(&self) -> Option<&T> {
        self.resource.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.resource.is_none()
    }

    /// Release the resource. Later calls do nothing and return `false`.
    pub fn dispose(&mut self) -> bool {
        match self.resource.take() {
            Some(mut resource) => {
                resource.dispose();
                log::trace!("Disposed {}", self.label);
                true
            }
            None => false,
        }
    }
}

impl<T: Disposable> Drop for Owned<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Dispose a group of guards. Returns how many actually released their
/// resource; guards disposed earlier are not counted again.
pub fn dispose_all<'a, T, I>(guards: I) -> usize
where
    T: Disposable + 'a,
    I: IntoIterator<Item = &'a mut Owned<T>>,
{
    guards
        .into_iter()
        .map(Owned::dispose)
        .filter(|&released| released)
        .count()
}
