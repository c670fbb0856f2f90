// Page layout: flat bucketing of panels onto pages plus per-page layout advice.

pub mod packer;
pub mod suggestion;
