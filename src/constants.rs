pub mod paging {

    pub const MIN_PAGE_ID: i32 = 1;

    pub const MIN_PAGE_SIZE: i32 = 5;

    pub const MAX_PAGE_SIZE: i32 = 10;
}

pub mod bpm {

    pub const MIN: i16 = 20;

    pub const MAX: i16 = 999;
}
