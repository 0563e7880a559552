//! Template helpers
//!
//! `{{phone_format value}}` renders a phone number as `+7 (XXXX) XX-XX-XX`;
//! `{{decimal_dot value 1}}` prints a number with a fixed count of decimals
//! and a dot separator (two by default).

use handlebars::{
    Context as HbContext, Handlebars, Helper, HelperDef, Output, RenderContext, RenderError,
};
use serde_json::Value;
use site_core::format_phone;

const DEFAULT_DECIMALS: usize = 2;

/// Display form of a phone value; non-strings render as their JSON text
pub fn phone_format(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(raw) => format_phone(raw),
        other => format_phone(&other.to_string()),
    }
}

/// Fixed-decimals rendering; unparsable input is returned as is
pub fn decimal_dot(value: &Value, places: usize) -> String {
    let number = match value {
        Value::Null => return String::new(),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) => format!("{n:.places$}"),
        None => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}

#[derive(Clone, Copy)]
pub(super) struct PhoneFormatHelper;

impl HelperDef for PhoneFormatHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc HbContext,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> Result<(), RenderError> {
        let formatted = h.param(0).map(|p| phone_format(p.value())).unwrap_or_default();
        out.write(&handlebars::html_escape(&formatted))?;
        Ok(())
    }
}

#[derive(Clone, Copy)]
pub(super) struct DecimalDotHelper;

impl HelperDef for DecimalDotHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc HbContext,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> Result<(), RenderError> {
        let places = h
            .param(1)
            .and_then(|p| p.value().as_u64())
            .map_or(DEFAULT_DECIMALS, |p| p as usize);
        let rendered = h
            .param(0)
            .map(|p| decimal_dot(p.value(), places))
            .unwrap_or_default();
        out.write(&handlebars::html_escape(&rendered))?;
        Ok(())
    }
}
