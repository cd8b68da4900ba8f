/// Separator used between a type and its members (methods, fields, constructors).
pub const MEMBER_SEPARATOR: char = '#';

/// Separator used between packages and between package/class.
pub const TYPE_SEPARATOR: char = '.';

/// Separator between an outer and a nested type in binary names.
pub const NESTED_SEPARATOR: char = '$';

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaNamingConvention;

impl JavaNamingConvention {
    /// Build a fully qualified name for a member (method, field, or constructor).
    ///
    /// # Examples
    /// ```ignore
    /// build_member_fqn("com.example.MyClass", "myMethod") => "com.example.MyClass#myMethod"
    /// ```
    pub fn build_member_fqn(type_fqn: &str, member_name: &str) -> String {
        format!("{}{}{}", type_fqn, MEMBER_SEPARATOR, member_name)
    }

    /// Parse a member FQN into (type_fqn, member_name).
    ///
    /// Returns `None` if the FQN does not contain a member separator.
    pub fn parse_member_fqn(fqn: &str) -> Option<(&str, &str)> {
        fqn.rfind(MEMBER_SEPARATOR)
            .map(|pos| (&fqn[..pos], &fqn[pos + 1..]))
    }

    /// Extract the type FQN from a member FQN.
    ///
    /// If the FQN is already a type FQN (no member separator), returns the original.
    pub fn extract_type_fqn(fqn: &str) -> &str {
        Self::parse_member_fqn(fqn)
            .map(|(type_fqn, _)| type_fqn)
            .unwrap_or(fqn)
    }

    /// Join a package (possibly the default package) and a type name.
    pub fn qualify(package: Option<&str>, name: &str) -> String {
        match package {
            Some(pkg) if !pkg.is_empty() => format!("{}{}{}", pkg, TYPE_SEPARATOR, name),
            _ => name.to_string(),
        }
    }

    /// Turn a binary-style name (`Outer$Inner`) into its source spelling (`Outer.Inner`).
    pub fn source_name(name: &str) -> String {
        name.replace(NESTED_SEPARATOR, ".")
    }
}
