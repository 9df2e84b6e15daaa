//! Helpers for talking to the raw GDAL C api and the bridge that routes GDAL
//! diagnostics into the `log` crate.

use std::ffi::CString;
use std::path::Path;
use std::sync::Once;

use gdal::cpl::CslStringList;
use gdal::errors::{CplErrType, GdalError};

use crate::Result;

pub const TRUE: std::ffi::c_int = 1;
pub const FALSE: std::ffi::c_int = 0;

/// Install the process wide GDAL diagnostics handler.
///
/// Every error/warning event emitted by GDAL is reformatted (line breaks
/// stripped) and logged as three lines: error number, error type and error
/// message. Installation happens once; repeated calls are no-ops so this is
/// safe to invoke from multiple entry points during startup.
pub fn install_diagnostics_handler() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        gdal::config::set_error_handler(|severity, number, message| {
            report_diagnostic(severity, number, message);
        });
    });
}

fn report_diagnostic(severity: CplErrType, number: i32, message: &str) {
    let level = match severity {
        CplErrType::Debug => log::Level::Debug,
        CplErrType::Warning => log::Level::Warn,
        CplErrType::Failure | CplErrType::Fatal => log::Level::Error,
        CplErrType::None => log::Level::Info,
    };

    let message = flatten_message(message);
    log::log!(level, "Error Number: {number}");
    log::log!(level, "Error Type: {}", severity_label(severity));
    log::log!(level, "Error Message: {message}");
}

fn severity_label(severity: CplErrType) -> &'static str {
    match severity {
        CplErrType::None => "None",
        CplErrType::Debug => "Debug",
        CplErrType::Warning => "Warning",
        CplErrType::Failure => "Failure",
        CplErrType::Fatal => "Fatal",
    }
}

fn flatten_message(message: &str) -> String {
    message.replace(['\r', '\n'], " ").trim_end().to_string()
}

pub fn create_string_list(options: &[String]) -> Result<CslStringList> {
    let mut result = CslStringList::new();
    for opt in options {
        result.add_string(opt)?;
    }

    Ok(result)
}

pub fn path_to_cstring(path: &Path) -> Result<CString> {
    Ok(CString::new(path.to_string_lossy().to_string())?)
}

pub fn create_output_directory_if_needed(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(())
}

pub fn check_rc(rc: gdal_sys::CPLErr::Type) -> std::result::Result<(), GdalError> {
    if rc != gdal_sys::CPLErr::CE_None {
        let msg = last_error_message();
        let last_err_no = unsafe { gdal_sys::CPLGetLastErrorNo() };
        Err(GdalError::CplError {
            class: rc,
            number: last_err_no,
            msg,
        })
    } else {
        Ok(())
    }
}

pub fn check_pointer(
    ptr: *mut libc::c_void,
    method_name: &'static str,
) -> std::result::Result<*mut libc::c_void, GdalError> {
    if ptr.is_null() {
        let msg = last_error_message();
        unsafe { gdal_sys::CPLErrorReset() };
        Err(GdalError::NullPointer { method_name, msg })
    } else {
        Ok(ptr)
    }
}

fn raw_string_to_string(raw_ptr: *const libc::c_char) -> String {
    let c_str = unsafe { std::ffi::CStr::from_ptr(raw_ptr) };
    c_str.to_string_lossy().into_owned()
}

fn last_error_message() -> String {
    raw_string_to_string(unsafe { gdal_sys::CPLGetLastErrorMsg() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_flattened_to_a_single_line() {
        assert_eq!(flatten_message("plain message"), "plain message");
        assert_eq!(
            flatten_message("first line\nsecond line\nthird"),
            "first line second line third"
        );
        assert_eq!(flatten_message("trailing newline\n"), "trailing newline");
        assert_eq!(flatten_message("crlf\r\nmessage"), "crlf  message");
    }

    #[test]
    fn severity_labels() {
        assert_eq!(severity_label(CplErrType::None), "None");
        assert_eq!(severity_label(CplErrType::Debug), "Debug");
        assert_eq!(severity_label(CplErrType::Warning), "Warning");
        assert_eq!(severity_label(CplErrType::Failure), "Failure");
        assert_eq!(severity_label(CplErrType::Fatal), "Fatal");
    }

    #[test]
    fn string_list_from_options() {
        let list = create_string_list(&["-of".to_string(), "GTiff".to_string()]).expect("valid options");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn repeated_handler_installation_is_a_noop() {
        install_diagnostics_handler();
        install_diagnostics_handler();
    }
}
