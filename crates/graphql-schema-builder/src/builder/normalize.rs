use crate::source::{Type, TypeId, TypeSource};

/// A type with its pointer and list wrappers peeled off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Shape {
    pub core: TypeId,
    pub nullable: bool,
    pub is_array: bool,
    pub element_nullable: bool,
    pub nest_depth: usize,
}

impl Shape {
    fn leaf(core: TypeId) -> Self {
        Shape {
            core,
            nullable: false,
            is_array: false,
            element_nullable: false,
            nest_depth: 0,
        }
    }
}

pub(crate) fn normalize(source: &dyn TypeSource, id: TypeId) -> Shape {
    match source.ty(id) {
        // Only one level: `**T` keeps a pointer core and is rejected later on.
        Type::Pointer { elem } => match source.ty(*elem) {
            Type::Slice { .. } | Type::Array { .. } => Shape {
                nullable: true,
                ..normalize(source, *elem)
            },
            _ => Shape {
                nullable: true,
                ..Shape::leaf(*elem)
            },
        },
        Type::Slice { elem } | Type::Array { elem, .. } => {
            let element = normalize(source, *elem);
            Shape {
                core: element.core,
                nullable: true,
                is_array: true,
                element_nullable: if element.is_array {
                    element.element_nullable
                } else {
                    element.nullable
                },
                nest_depth: element.nest_depth + 1,
            }
        }
        _ => Shape::leaf(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{BasicKind, Package};

    #[test]
    fn pointers_and_slices() {
        let mut package = Package::new("example.com/models");
        let string = package.basic(BasicKind::String);
        let string_ptr = package.pointer(string);
        let string_ptrs = package.slice(string_ptr);
        let string_ptrs_ptr = package.pointer(string_ptrs);
        let strings = package.slice(string);
        let nested = package.slice(strings);
        let double_ptr = package.pointer(string_ptr);
        let fixed = package.add(Type::Array { elem: strings, len: 4 });

        assert_eq!(normalize(&package, string), Shape::leaf(string));
        assert_eq!(normalize(&package, string_ptr), Shape {
            core: string,
            nullable: true,
            is_array: false,
            element_nullable: false,
            nest_depth: 0,
        });
        assert_eq!(normalize(&package, string_ptrs_ptr), Shape {
            core: string,
            nullable: true,
            is_array: true,
            element_nullable: true,
            nest_depth: 1,
        });
        assert_eq!(normalize(&package, nested), Shape {
            core: string,
            nullable: true,
            is_array: true,
            element_nullable: false,
            nest_depth: 2,
        });
        assert_eq!(normalize(&package, fixed), normalize(&package, nested));
        assert_eq!(normalize(&package, double_ptr).core, string_ptr);
    }
}
