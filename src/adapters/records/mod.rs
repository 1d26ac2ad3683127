pub mod json_record_file;
