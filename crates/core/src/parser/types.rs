use super::Parser;
use crate::ast::VarType;
use crate::error::ParseError;

impl<'a> Parser<'a> {
    // -- Type hints -----------------------------------------------

    /// Consume a type hint if one is next.
    pub(super) fn take_type_hint(&mut self) -> Option<VarType> {
        let hint = VarType::from_token_kind(self.peek_kind())?;
        self.advance();
        Some(hint)
    }

    pub(super) fn expect_type_hint(&mut self, msg: &str) -> Result<VarType, ParseError> {
        self.take_type_hint().ok_or_else(|| self.err(msg))
    }

    /// A type hint that must name a single value, not an array.
    pub(super) fn expect_scalar_type(&mut self, msg: &str) -> Result<VarType, ParseError> {
        let at = self.cur();
        match self.take_type_hint() {
            Some(hint) if !hint.is_array() => Ok(hint),
            _ => Err(self.err_at(at, msg)),
        }
    }

    /// Optional scalar hint, as allowed before a reassigned value.
    pub(super) fn take_scalar_type(&mut self) -> Result<Option<VarType>, ParseError> {
        match VarType::from_token_kind(self.peek_kind()) {
            None => Ok(None),
            Some(_) => self
                .expect_scalar_type("Expected non-array variable type")
                .map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{error, main_body, statements};
    use crate::ast::{Statement, VarType};

    #[test]
    fn modify_accepts_scalar_hint() {
        let items = statements("Did you know that Spike is a number?\nSpike becomes the number 2.");
        assert!(matches!(&items[1], Statement::Modify { identifier, .. } if identifier == "Spike"));
    }

    #[test]
    fn modify_rejects_array_hint() {
        let err = error(&main_body("Spike becomes many numbers 2."));
        assert_eq!(err.message, "Expected non-array variable type");
    }

    #[test]
    fn parameter_types() {
        let src = "Dear Princess Celestia: Types.\n\
                   I learned echo using the word w, many numbers n to get a letter.\n\
                   Then you get 'a'!\n\
                   That's all about echo!\n\
                   Your faithful student, Spike.\n";
        let report = super::super::tests::parse(src).unwrap();
        let f = report.functions().next().unwrap();
        let types: Vec<VarType> = f.parameters.iter().map(|p| p.var_type).collect();
        assert_eq!(types, vec![VarType::String, VarType::NumberArray]);
        assert_eq!(f.return_type, Some(VarType::Character));
    }
}
