pub mod worklog_service;
