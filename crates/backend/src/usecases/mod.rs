pub mod u501_object_upload;
