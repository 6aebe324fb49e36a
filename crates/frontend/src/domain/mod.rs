pub mod a001_registration;
