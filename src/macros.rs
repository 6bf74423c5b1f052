#![allow(unused_macros)]

/// Helper macro for read-locking a store table, mapping poisoning to [`crate::Error::LockError`]
///
/// ```rust, ignore
///  let entries = read_lock!(self.entries)?;
///  let value = entries.get(path).cloned();
/// ```
macro_rules! read_lock {
    ($rwlock:expr) => {
        $rwlock.read().map_err(|_| crate::Error::LockError)
    };
}

/// Helper macro for write-locking a store table, mapping poisoning to [`crate::Error::LockError`]
///
/// ```rust, ignore
///  let mut entries = write_lock!(self.entries)?;
///  entries.insert(path.to_string(), value.clone());
/// ```
macro_rules! write_lock {
    ($rwlock:expr) => {
        $rwlock.write().map_err(|_| crate::Error::LockError)
    };
}
