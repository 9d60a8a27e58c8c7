//! The (de)serialization entry point and its builder.

use alloc::boxed::Box;
use alloc::string::String;

use crate::SerialError;
use crate::construct::{
    AccessorStrategy, DefaultAccessorStrategy, DefaultObjectConstructor, ObjectConstructor,
};
use crate::context::{ContextConfig, DeserializationContext, SerializationContext};
use crate::data::Data;
use crate::desc::TypeDesc;
use crate::format::Format;
use crate::handler::{
    CollectionHandler, HandlerRegistry, SetHandler, SubscribingHandler, UnionHandler, ValueHandler,
};
use crate::reflect::{FromReflect, Reflect, TypePath};
use crate::registry::{TypeMeta, TypeRegistry, Typed};
use crate::visitor::{
    self, JsonDeserializationVisitor, JsonSerializationVisitor, VisitorOptions,
};

// -----------------------------------------------------------------------------
// Serializer

/// Converts registered types from and to the supported formats.
///
/// Created through [`SerializerBuilder`].
pub struct Serializer {
    registry: TypeRegistry,
    handlers: HandlerRegistry,
    constructor: Box<dyn ObjectConstructor>,
    accessor: Box<dyn AccessorStrategy>,
    serialize_null: bool,
    options: VisitorOptions,
}

impl Serializer {
    #[inline]
    pub fn builder() -> SerializerBuilder {
        SerializerBuilder::new()
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[inline]
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    fn config(&self) -> ContextConfig<'_> {
        ContextConfig {
            registry: &self.registry,
            handlers: &self.handlers,
            constructor: &*self.constructor,
            accessor: &*self.accessor,
            serialize_null: self.serialize_null,
        }
    }

    /// Serializes `value` as its own runtime type.
    pub fn serialize(&self, value: &dyn Reflect, format: Format) -> Result<String, SerialError> {
        self.serialize_as(value, &TypeDesc::new(value.reflect_type_path()), format)
    }

    /// Serializes `value` declared as `ty`.
    pub fn serialize_as(
        &self,
        value: &dyn Reflect,
        ty: &TypeDesc,
        format: Format,
    ) -> Result<String, SerialError> {
        let visitor = visitor::serialization_visitor(format, self.options);
        let mut ctx = SerializationContext::new(self.config(), visitor);
        let data = ctx.accept(value, ty)?;
        let root_name = self
            .registry
            .get(value.reflect_type_path())
            .and_then(TypeMeta::xml_root_name);
        ctx.finish(&data, root_name)
    }

    /// Deserializes `input` as a `T`.
    pub fn deserialize<T: FromReflect + TypePath>(
        &self,
        input: &str,
        format: Format,
    ) -> Result<T, SerialError> {
        let value = self.deserialize_type(input, &TypeDesc::new(T::type_path()), format)?;
        T::from_reflect(value)
    }

    /// Deserializes `input` as a value of `ty`.
    ///
    /// The result is a dynamic value, containers are returned in their
    /// decoded form (see [`DynamicCollection`]).
    ///
    /// [`DynamicCollection`]: crate::collections::DynamicCollection
    pub fn deserialize_type(
        &self,
        input: &str,
        ty: &TypeDesc,
        format: Format,
    ) -> Result<Box<dyn Reflect>, SerialError> {
        let visitor = visitor::deserialization_visitor(format)?;
        let mut ctx = DeserializationContext::new(self.config(), visitor);
        let data = ctx.prepare(input)?;
        ctx.accept(data, ty)
    }

    /// Serializes `value` into a data tree, as the JSON writer would see it.
    pub fn to_data(&self, value: &dyn Reflect) -> Result<Data, SerialError> {
        let mut ctx = SerializationContext::new(self.config(), Box::new(JsonSerializationVisitor));
        ctx.accept(value, &TypeDesc::new(value.reflect_type_path()))
    }

    /// Deserializes a data tree as a `T`, as the JSON reader would.
    pub fn from_data<T: FromReflect + TypePath>(&self, data: Data) -> Result<T, SerialError> {
        let mut ctx =
            DeserializationContext::new(self.config(), Box::new(JsonDeserializationVisitor));
        let value = ctx.accept(data, &TypeDesc::new(T::type_path()))?;
        T::from_reflect(value)
    }
}

impl core::fmt::Debug for Serializer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Serializer")
            .field("registry", &self.registry)
            .field("handlers", &self.handlers)
            .field("serialize_null", &self.serialize_null)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// SerializerBuilder

/// Configures a [`Serializer`].
///
/// Registration errors are kept until [`build`](Self::build), which also
/// checks that every declared union alternative is a registered type.
///
/// # Examples
///
/// ```
/// use vc_serial::{Format, Serializer};
/// use vc_serial::construct::{
///     DefaultAccessorStrategy, DefaultObjectConstructor, TypedCollectionAccessorStrategy,
///     TypedCollectionObjectConstructor,
/// };
///
/// let serializer = Serializer::builder()
///     .add_default_handlers()
///     .with_object_constructor(TypedCollectionObjectConstructor::new(DefaultObjectConstructor))
///     .with_accessor_strategy(TypedCollectionAccessorStrategy::new(DefaultAccessorStrategy))
///     .build()
///     .unwrap();
///
/// let names = serializer
///     .deserialize_type(r#"["a","b"]"#, &"Collection<string>".parse().unwrap(), Format::Json)
///     .unwrap();
/// assert_eq!(serializer.serialize(&*names, Format::Json).unwrap(), r#"["a","b"]"#);
/// ```
pub struct SerializerBuilder {
    registry: TypeRegistry,
    handlers: HandlerRegistry,
    constructor: Option<Box<dyn ObjectConstructor>>,
    accessor: Option<Box<dyn AccessorStrategy>>,
    serialize_null: bool,
    options: VisitorOptions,
    error: Option<SerialError>,
}

impl SerializerBuilder {
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
            handlers: HandlerRegistry::new(),
            constructor: None,
            accessor: None,
            serialize_null: false,
            options: VisitorOptions::default(),
            error: None,
        }
    }

    /// Registers `T` in the type registry.
    pub fn register_type<T: Typed>(mut self) -> Self {
        if let Err(err) = self.registry.register::<T>() {
            self.error.get_or_insert(err);
        }
        self
    }

    /// Inserts a prepared [`TypeMeta`], for example an interface name.
    pub fn register_meta(mut self, meta: TypeMeta) -> Self {
        self.registry.insert(meta);
        self
    }

    /// Registers the collection, set and union handlers.
    pub fn add_default_handlers(mut self) -> Self {
        self.handlers
            .register_subscribing_handler(CollectionHandler)
            .register_subscribing_handler(SetHandler)
            .register_subscribing_handler(UnionHandler);
        self
    }

    pub fn add_handler<H: SubscribingHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.register_subscribing_handler(handler);
        self
    }

    /// Registers a [`ValueHandler`] for `types`.
    pub fn add_value_handler(self, types: impl IntoIterator<Item = &'static str>) -> Self {
        self.add_handler(ValueHandler::new(types))
    }

    /// Gives direct access to the handler registry.
    pub fn configure_handlers(mut self, f: impl FnOnce(&mut HandlerRegistry)) -> Self {
        f(&mut self.handlers);
        self
    }

    /// Replaces the [`DefaultObjectConstructor`].
    pub fn with_object_constructor<C: ObjectConstructor + 'static>(mut self, constructor: C) -> Self {
        self.constructor = Some(Box::new(constructor));
        self
    }

    /// Replaces the [`DefaultAccessorStrategy`].
    pub fn with_accessor_strategy<A: AccessorStrategy + 'static>(mut self, accessor: A) -> Self {
        self.accessor = Some(Box::new(accessor));
        self
    }

    /// Emits fields without a value as null, they are skipped by default.
    #[inline]
    pub fn serialize_null(mut self, serialize_null: bool) -> Self {
        self.serialize_null = serialize_null;
        self
    }

    /// Indentation width of XML output, 2 by default.
    #[inline]
    pub fn xml_indent(mut self, width: usize) -> Self {
        self.options.xml_indent = width;
        self
    }

    pub fn build(self) -> Result<Serializer, SerialError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.registry.validate()?;
        log::debug!("build serializer with {} registered types", self.registry.len());

        Ok(Serializer {
            registry: self.registry,
            handlers: self.handlers,
            constructor: self
                .constructor
                .unwrap_or_else(|| Box::new(DefaultObjectConstructor)),
            accessor: self
                .accessor
                .unwrap_or_else(|| Box::new(DefaultAccessorStrategy)),
            serialize_null: self.serialize_null,
            options: self.options,
        })
    }
}

impl Default for SerializerBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests
