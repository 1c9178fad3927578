macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

/// Versioned API route definitions shared by the server and its tests
pub mod v1 {
    pub const ROOT: &str = "/api/v1";
    pub const VERSION: &str = "v1";

    pub mod movies {
        pub const COLLECTION: &str = v1_path!("/movies");
        pub const ITEM: &str = v1_path!("/movies/{id}");
    }

    pub mod actors {
        pub const COLLECTION: &str = v1_path!("/actors");
        pub const ITEM: &str = v1_path!("/actors/{id}");
    }

    pub mod reviews {
        pub const COLLECTION: &str = v1_path!("/reviews");
    }

    pub mod ratings {
        pub const COLLECTION: &str = v1_path!("/ratings");
    }
}

pub mod utils {
    /// Replace a single path parameter (e.g. `"{id}"`) with the provided value.
    pub fn replace_param(
        route: &str,
        param: &str,
        value: impl AsRef<str>,
    ) -> String {
        route.replace(param, value.as_ref())
    }

    /// Route relative to the versioned root, as mounted by the v1 router.
    pub fn strip_root(route: &str) -> &str {
        route.strip_prefix(super::v1::ROOT).unwrap_or(route)
    }
}
