use vc_serial::collections::Set;
use vc_serial::impl_reflect_struct;
use vc_serial::registry::{TypeMeta, Typed};
use vc_serial::SerialError;

use super::{COMPANY_NAME, field};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Employee {
    pub name: String,
}

impl Employee {
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }
}

impl_reflect_struct!(Employee as "set.Employee" { name });

impl Typed for Employee {
    fn type_meta() -> Result<TypeMeta, SerialError> {
        Ok(TypeMeta::structure::<Self>(|values| {
            Ok(Self {
                name: values.take("name")?,
            })
        })
        .with_field(field("name", "string")?.as_xml_attribute()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub name: String,
    pub employees: Set<Employee>,
}

impl Company {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            employees: Set::new(),
        }
    }

    pub fn apple() -> Self {
        let mut company = Self::new(COMPANY_NAME);
        company.employees.insert(Employee::new("Joost Nijhuis"));
        company.employees.insert(Employee::new("John Doe"));
        company
    }
}

impl_reflect_struct!(Company as "set.Company" { name, employees });

impl Typed for Company {
    fn type_meta() -> Result<TypeMeta, SerialError> {
        Ok(TypeMeta::structure::<Self>(|values| {
            Ok(Self {
                name: values.take("name")?,
                employees: values.take("employees")?,
            })
        })
        .with_field(field("name", "string")?.as_xml_attribute())
        .with_field(field("employees", "Set<set.Employee>")?.with_xml_entry("employee"))
        .with_xml_root("company"))
    }
}
