//! Feature-to-C Translation
//!
//! Each supported calculator maps to a fixed C template over a `float`
//! buffer `buf` of `len` samples. Accumulation is done in `double`.

use crate::identifier::FeatureIdentifier;
use crate::statistics::Calculator;
use crate::FeatureError;
use tracing::warn;

/// Name of the sample buffer the fragments read
pub const BUFFER_IDENT: &str = "buf";

/// Name of the sample count the fragments read
pub const LENGTH_IDENT: &str = "len";

/// Longest identifier emitted; 31 significant characters is the C89 limit
/// several embedded compilers still enforce
pub const MAX_IDENT_LEN: usize = 31;

const HASH_SUFFIX_LEN: usize = 9;

/// C fragment computing one scalar feature
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedFeature {
    /// Feature identifier the fragment was built from
    pub feature: String,
    /// Declared `float` variable holding the result
    pub variable: String,
    /// Calculator the template implements
    pub calculator: Calculator,
    /// Declaration plus computation, unindented, one statement per line
    pub code: String,
    /// `false` for zero-valued stubs
    pub implemented: bool,
}

/// Derive a C identifier from a full feature identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`. Names longer than
/// [`MAX_IDENT_LEN`] are cut and suffixed with an FNV-1a hash of the full
/// identifier so distinct features keep distinct names.
pub fn variable_name(feature: &str) -> String {
    let sanitized: String = feature
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    let name = format!("f_{}", sanitized);

    if name.len() <= MAX_IDENT_LEN {
        return name;
    }

    let keep = MAX_IDENT_LEN - HASH_SUFFIX_LEN;
    format!("{}_{:08x}", &name[..keep], fnv1a(feature.as_bytes()))
}

/// Translate a parsed identifier into a C fragment
pub fn translate(feature: &FeatureIdentifier) -> TranslatedFeature {
    let variable = variable_name(feature.as_str());
    let calculator = feature.calculator().clone();
    let code = template(&calculator, &variable, feature.as_str());

    if !calculator.is_implemented() {
        warn!(
            "Feature '{}' uses calculator '{}' with no embedded template; emitting zero stub",
            feature, calculator
        );
    }

    TranslatedFeature {
        feature: feature.as_str().to_string(),
        variable,
        implemented: calculator.is_implemented(),
        calculator,
        code,
    }
}

/// Parse and translate a raw identifier
pub fn translate_str(raw: &str) -> Result<TranslatedFeature, FeatureError> {
    Ok(translate(&FeatureIdentifier::parse(raw)?))
}

fn template(calculator: &Calculator, var: &str, feature: &str) -> String {
    let (buf, len) = (BUFFER_IDENT, LENGTH_IDENT);

    match calculator {
        Calculator::Length => format!("float {var} = (float){len};\n"),
        Calculator::Mean => format!(
            "float {var};\n\
             {{\n    \
                 double sum = 0.0;\n    \
                 for (int i = 0; i < {len}; i++) {{\n        \
                     sum += (double){buf}[i];\n    \
                 }}\n    \
                 {var} = (float)(sum / (double){len});\n\
             }}\n"
        ),
        Calculator::Variance | Calculator::StandardDeviation => {
            let result = if *calculator == Calculator::Variance {
                format!("(float)(ssd / (double){len})")
            } else {
                format!("(float)sqrt(ssd / (double){len})")
            };
            format!(
                "float {var};\n\
                 {{\n    \
                     double sum = 0.0;\n    \
                     for (int i = 0; i < {len}; i++) {{\n        \
                         sum += (double){buf}[i];\n    \
                     }}\n    \
                     double mean = sum / (double){len};\n    \
                     double ssd = 0.0;\n    \
                     for (int i = 0; i < {len}; i++) {{\n        \
                         double d = (double){buf}[i] - mean;\n        \
                         ssd += d * d;\n    \
                     }}\n    \
                     {var} = {result};\n\
                 }}\n"
            )
        }
        Calculator::Maximum | Calculator::Minimum => {
            let op = if *calculator == Calculator::Maximum { ">" } else { "<" };
            format!(
                "float {var} = {buf}[0];\n\
                 for (int i = 1; i < {len}; i++) {{\n    \
                     if ({buf}[i] {op} {var}) {{\n        \
                         {var} = {buf}[i];\n    \
                     }}\n\
                 }}\n"
            )
        }
        Calculator::Unsupported(name) => format!(
            "/* UNIMPLEMENTED: '{}' has no embedded template ({}). */\n\
             /* STUB: constant 0.0f, review before flashing. */\n\
             float {var} = 0.0f;\n",
            name.replace("*/", "* /"),
            feature.replace("*/", "* /"),
        ),
    }
}

fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for &b in bytes {
        hash ^= b as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}
