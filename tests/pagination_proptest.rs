//! Property tests for listing pagination

use proptest::prelude::*;

use poetica::shared::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE};
use poetica::shared::PageRequest;

proptest! {
    #[test]
    fn resolved_request_is_always_usable(
        page in proptest::option::of(".{0,12}"),
        limit in proptest::option::of(".{0,12}"),
        max_limit in 0u32..200,
    ) {
        let request = PageRequest::from_query(page.as_deref(), limit.as_deref(), max_limit);
        prop_assert!(request.page >= 1);
        prop_assert!(request.limit >= 1);
        prop_assert!(request.limit <= max_limit.max(1));
    }

    #[test]
    fn numeric_values_are_kept_when_in_range(page in 1u32..10_000, limit in 1u32..=50) {
        let request = PageRequest::from_query(
            Some(&page.to_string()),
            Some(&limit.to_string()),
            50,
        );
        prop_assert_eq!(request, PageRequest::new(page, limit));
    }

    #[test]
    fn non_positive_values_fall_back_to_defaults(page in i64::MIN..=0, limit in i64::MIN..=0) {
        let request = PageRequest::from_query(
            Some(&page.to_string()),
            Some(&limit.to_string()),
            50,
        );
        prop_assert_eq!(request, PageRequest::new(DEFAULT_PAGE, DEFAULT_LIMIT));
    }

    #[test]
    fn pages_cover_every_record(total in 0u64..100_000, limit in 1u32..=50) {
        let request = PageRequest::new(1, limit);
        let pages = u64::from(request.page_count(total));
        prop_assert!(pages * u64::from(limit) >= total);
        if total > 0 {
            prop_assert!((pages - 1) * u64::from(limit) < total);
        } else {
            prop_assert_eq!(pages, 0);
        }
    }

    #[test]
    fn offset_skips_previous_pages(page in 1u32..100_000, limit in 1u32..=50) {
        let request = PageRequest::new(page, limit);
        prop_assert_eq!(request.offset(), u64::from(page - 1) * u64::from(limit));
    }
}
