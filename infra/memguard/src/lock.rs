//! Best-effort page locking.
//!
//! Locking keeps secret pages out of swap. It is an optimisation, not a guarantee: the call fails
//! under a low `RLIMIT_MEMLOCK`, inside many containers, and on platforms without `mlock`. Failure
//! is logged at debug level and the caller carries on with unlocked memory.
//!
//! Locks are per page while buffers are not, so small buffers often share a page. Every locked
//! page carries a count of the live regions on it and is only unlocked when the last one goes.

#[cfg(unix)]
pub(crate) use unix::{lock, unlock};

#[cfg(not(unix))]
pub(crate) const fn lock(_region: &[u8]) -> bool {
    false
}

#[cfg(not(unix))]
pub(crate) const fn unlock(_region: &[u8]) {}

#[cfg(unix)]
mod unix {
    use fxhash::FxHashMap;
    use parking_lot::Mutex;
    use std::ops::RangeInclusive;
    use std::sync::{LazyLock, OnceLock};
    use tracing::debug;

    const FALLBACK_PAGE_SIZE: usize = 4096;

    /// Page index -> number of locked regions touching it.
    static PAGES: LazyLock<Mutex<FxHashMap<usize, usize>>> =
        LazyLock::new(|| Mutex::new(FxHashMap::default()));

    #[allow(unsafe_code)]
    pub(super) fn page_size() -> usize {
        static SIZE: OnceLock<usize> = OnceLock::new();
        *SIZE.get_or_init(|| {
            // SAFETY: sysconf has no preconditions.
            let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
            usize::try_from(size).ok().filter(|&s| s > 0).unwrap_or(FALLBACK_PAGE_SIZE)
        })
    }

    /// Pages spanned by a non-empty region.
    pub(super) fn pages(region: &[u8]) -> RangeInclusive<usize> {
        let size = page_size();
        let start = region.as_ptr() as usize;
        (start / size)..=((start + region.len() - 1) / size)
    }

    #[allow(unsafe_code)]
    pub(crate) fn lock(region: &[u8]) -> bool {
        if region.is_empty() {
            return false;
        }
        let mut table = PAGES.lock();
        // SAFETY: the pointer and length describe a live, borrowed allocation for the whole call.
        let rc = unsafe { libc::mlock(region.as_ptr().cast(), region.len()) };
        if rc != 0 {
            debug!(
                len = region.len(),
                error = %std::io::Error::last_os_error(),
                "Memory lock unavailable, continuing unlocked"
            );
            return false;
        }
        for page in pages(region) {
            *table.entry(page).or_insert(0) += 1;
        }
        true
    }

    #[allow(unsafe_code)]
    pub(crate) fn unlock(region: &[u8]) {
        if region.is_empty() {
            return;
        }
        let size = page_size();
        let mut table = PAGES.lock();
        for page in pages(region) {
            let Some(count) = table.get_mut(&page) else { continue };
            *count -= 1;
            if *count > 0 {
                continue;
            }
            table.remove(&page);
            // SAFETY: munlock only changes residency of the page and never dereferences it; the
            // page is still mapped because `region` lies in it.
            let rc = unsafe { libc::munlock((page * size) as *const libc::c_void, size) };
            if rc != 0 {
                debug!(page, error = %std::io::Error::last_os_error(), "Memory unlock failed");
            }
        }
    }

    #[cfg(test)]
    pub(super) fn lock_count(page: usize) -> usize {
        PAGES.lock().get(&page).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_regions_are_never_locked() {
        assert!(!lock(&[]));
        unlock(&[]);
    }

    #[test]
    fn lock_then_unlock_does_not_panic() {
        let region = vec![7u8; 64];
        if lock(&region) {
            unlock(&region);
        }
    }

    #[cfg(unix)]
    #[test]
    fn shared_page_stays_locked_until_last_region_is_released() {
        use super::unix::{lock_count, page_size, pages};

        let size = page_size();
        // Three pages guarantee one page owned entirely by this allocation.
        let storage = vec![0u8; size * 3];
        let offset = storage.as_ptr().align_offset(size);
        let page_region = &storage[offset..offset + size];
        let (first, second) = page_region.split_at(size / 2);
        let page = *pages(page_region).start();

        if !lock(first) {
            return;
        }
        if !lock(second) {
            unlock(first);
            return;
        }
        assert_eq!(lock_count(page), 2);

        unlock(first);
        assert_eq!(lock_count(page), 1, "page released while another region still uses it");

        unlock(second);
        assert_eq!(lock_count(page), 0);
    }

    #[cfg(unix)]
    #[test]
    fn regions_spanning_pages_count_every_page() {
        use super::unix::{lock_count, page_size, pages};

        let size = page_size();
        let storage = vec![0u8; size * 4];
        let offset = storage.as_ptr().align_offset(size);
        // Straddles the boundary between two pages owned by this allocation.
        let region = &storage[offset + size / 2..offset + size + size / 2];
        let spanned = pages(region);
        assert_eq!(spanned.clone().count(), 2);

        if lock(region) {
            assert!(spanned.clone().all(|page| lock_count(page) == 1));
            unlock(region);
            assert!(spanned.clone().all(|page| lock_count(page) == 0));
        }
    }
}
