use crate::error::Error;
use crate::storage::Storage;
use soroban_sdk::Env;

/// Run `f` inside the ledger-wide critical section.
///
/// A nested entry while the flag is held fails with `ReentrantCall`
/// before touching any state.
pub fn non_reentrant<T, F>(env: &Env, f: F) -> Result<T, Error>
where
    F: FnOnce() -> Result<T, Error>,
{
    if Storage::is_locked(env) {
        return Err(Error::ReentrantCall);
    }
    Storage::set_locked(env, true);
    let result = f();
    Storage::set_locked(env, false);
    result
}
