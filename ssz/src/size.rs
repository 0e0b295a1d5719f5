use crate::consts::BYTES_PER_LENGTH_OFFSET;

/// Size of an SSZ encoding as known from the type alone.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Size {
    Fixed { size: usize },
    Variable { minimum_size: usize },
}

impl Size {
    /// Number of bytes a value of this size occupies in the fixed part of a containing value.
    #[must_use]
    pub const fn fixed_part(self) -> usize {
        match self {
            Self::Fixed { size } => size,
            Self::Variable { .. } => BYTES_PER_LENGTH_OFFSET,
        }
    }

    #[must_use]
    pub const fn minimum_size(self) -> usize {
        match self {
            Self::Fixed { size } => size,
            Self::Variable { minimum_size } => minimum_size,
        }
    }

    #[must_use]
    pub const fn is_variable(self) -> bool {
        matches!(self, Self::Variable { .. })
    }

    /// Combines the sizes of container fields listed in declaration order.
    #[must_use]
    pub const fn for_container(fields: &[Self]) -> Self {
        let mut fixed_part = 0;
        let mut variable_minimum = 0;
        let mut variable = false;
        let mut index = 0;

        while index < fields.len() {
            let field = fields[index];

            fixed_part += field.fixed_part();

            if let Self::Variable { minimum_size } = field {
                variable_minimum += minimum_size;
                variable = true;
            }

            index += 1;
        }

        if variable {
            Self::Variable {
                minimum_size: fixed_part + variable_minimum,
            }
        } else {
            Self::Fixed { size: fixed_part }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_of_fixed_fields_is_fixed() {
        let size = Size::for_container(&[Size::Fixed { size: 8 }, Size::Fixed { size: 48 }]);

        assert_eq!(size, Size::Fixed { size: 56 });
    }

    #[test]
    fn variable_field_contributes_an_offset_and_its_minimum() {
        let size = Size::for_container(&[
            Size::Fixed { size: 8 },
            Size::Variable { minimum_size: 1 },
            Size::Fixed { size: 96 },
        ]);

        assert_eq!(size, Size::Variable { minimum_size: 109 });
        assert_eq!(size.fixed_part(), BYTES_PER_LENGTH_OFFSET);
    }
}
