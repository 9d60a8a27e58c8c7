use vc_serial::collections::Collection;
use vc_serial::impl_reflect_struct;
use vc_serial::registry::{TypeMeta, Typed};
use vc_serial::SerialError;

use super::{Age, COMPANY_NAME, field};

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub name: String,
    pub age: Age,
}

impl Employee {
    pub fn new(name: &str, age: i64) -> Self {
        Self {
            name: name.into(),
            age: Age::of(age),
        }
    }
}

impl_reflect_struct!(Employee as "Employee" { name, age });

impl Typed for Employee {
    fn type_meta() -> Result<TypeMeta, SerialError> {
        Ok(TypeMeta::structure::<Self>(|values| {
            Ok(Self {
                name: values.take("name")?,
                age: values.take("age")?,
            })
        })
        .with_field(field("name", "string")?.as_xml_attribute())
        .with_field(field("age", "Age<integer>")?.as_xml_attribute()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub name: String,
    pub employees: Collection<Employee>,
}

impl Company {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            employees: Collection::new(),
        }
    }

    pub fn apple() -> Self {
        let mut company = Self::new(COMPANY_NAME);
        company.employees.push(Employee::new("Joost Nijhuis", 40));
        company.employees.push(Employee::new("John Doe", 25));
        company
    }
}

impl_reflect_struct!(Company as "Company" { name, employees });

impl Typed for Company {
    fn type_meta() -> Result<TypeMeta, SerialError> {
        Ok(TypeMeta::structure::<Self>(|values| {
            Ok(Self {
                name: values.take("name")?,
                employees: values.take("employees")?,
            })
        })
        .with_field(field("name", "string")?.as_xml_attribute())
        .with_field(field("employees", "Collection<Employee>")?.with_xml_entry("employee"))
        .with_xml_root("company"))
    }
}
