use vc_serial::registry::{TypeMeta, Typed};
use vc_serial::{SerialError, impl_reflect_struct, impl_reflect_union};

use super::{Age, field};

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub name: String,
}

impl_reflect_struct!(Author as "Author" { name });

impl Typed for Author {
    fn type_meta() -> Result<TypeMeta, SerialError> {
        Ok(TypeMeta::structure::<Self>(|values| {
            Ok(Self {
                name: values.take("name")?,
            })
        })
        .with_field(field("name", "string")?))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub title: String,
    pub author: Author,
}

impl Book {
    pub fn design_patterns() -> Self {
        Self {
            title: "Design patterns".into(),
            author: Author {
                name: "John Doe".into(),
            },
        }
    }
}

impl_reflect_struct!(Book as "Book" { title, author });

impl Typed for Book {
    fn type_meta() -> Result<TypeMeta, SerialError> {
        Ok(TypeMeta::structure::<Self>(|values| {
            Ok(Self {
                title: values.take("title")?,
                author: values.take("author")?,
            })
        })
        .with_field(field("title", "string")?)
        .with_field(field("author", "Author")?))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub title: String,
    pub rating: f64,
}

impl Movie {
    pub fn the_matrix() -> Self {
        Self {
            title: "The matrix".into(),
            rating: 8.7,
        }
    }
}

impl_reflect_struct!(Movie as "Movie" { title, rating });

impl Typed for Movie {
    fn type_meta() -> Result<TypeMeta, SerialError> {
        Ok(TypeMeta::structure::<Self>(|values| {
            Ok(Self {
                title: values.take("title")?,
                rating: values.take("rating")?,
            })
        })
        .with_field(field("title", "string")?)
        .with_field(field("rating", "float")?))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Media {
    Book(Book),
    Movie(Movie),
}

impl_reflect_union!(Media as "Media" { Book(Book), Movie(Movie) });

#[derive(Debug, Clone, PartialEq)]
pub struct MediaContainer {
    pub media: Media,
}

impl_reflect_struct!(MediaContainer as "MediaContainer" { media });

impl Typed for MediaContainer {
    fn type_meta() -> Result<TypeMeta, SerialError> {
        Ok(TypeMeta::structure::<Self>(|values| {
            Ok(Self {
                media: values.take("media")?,
            })
        })
        .with_field(field("media", "union<Book, Movie>")?))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub name: String,
    pub age: Age,
    pub media: Vec<Media>,
}

impl_reflect_struct!(Employee as "union.Employee" { name, age, media });

impl Typed for Employee {
    fn type_meta() -> Result<TypeMeta, SerialError> {
        Ok(TypeMeta::structure::<Self>(|values| {
            Ok(Self {
                name: values.take("name")?,
                age: values.take("age")?,
                media: values.take("media")?,
            })
        })
        .with_field(field("name", "string")?)
        .with_field(field("age", "Age<integer>")?)
        .with_field(field("media", "array<union<Book, Movie>>")?))
    }
}
