pub mod core {
    pub mod bits;
    pub mod json_file;
    pub mod json_file_async;
    pub mod logging;
    pub mod test_util;
}

pub mod deployment {
    pub mod error;
    pub mod params;
    pub mod report;
}

pub mod routes {
    pub mod encoding;
    pub mod route;
}
