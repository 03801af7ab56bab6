use std::ops::{Deref, DerefMut};

/// Runs `func` with `arg` when the returned guard goes out of scope, either by a normal
/// return, an early `?` return or an unwinding panic.
///
/// The guard derefs to `arg`, so the value it watches stays usable inside the scope.
pub fn finally<A, F>(arg: A, func: F) -> FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    FinallyGuard { arg, func }
}

pub struct FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    arg: A,
    func: F,
}

impl<A, F> FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    /// Drops the guard without running its function.
    pub fn forget(self) {
        ::std::mem::forget(self);
    }
}

impl<A, F> Deref for FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    type Target = A;

    fn deref(&self) -> &A {
        &self.arg
    }
}

impl<A, F> DerefMut for FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    fn deref_mut(&mut self) -> &mut A {
        &mut self.arg
    }
}

impl<A, F> Drop for FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    fn drop(&mut self) {
        (self.func)(&mut self.arg)
    }
}
