//! Type-erased protobuf messages

use std::any::Any;
use std::fmt;

/// A protobuf message whose concrete type is only known at runtime.
///
/// Every `prost::Message` implements this trait. Generated dispatch adapters
/// receive requests as `Box<dyn AnyMessage>` and recover the concrete input
/// type with [`downcast`](#method.downcast).
pub trait AnyMessage: Any + Send + Sync + fmt::Debug {
    /// Fully qualified Rust type name of the message
    fn type_name(&self) -> &'static str;

    /// Encode the message in protobuf wire format
    fn encode_message(&self) -> Vec<u8>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T> AnyMessage for T
where
    T: prost::Message + fmt::Debug + 'static,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn encode_message(&self) -> Vec<u8> {
        prost::Message::encode_to_vec(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

impl dyn AnyMessage {
    /// Whether the message is a `T`
    pub fn is<T: AnyMessage>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: AnyMessage>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Recover the concrete message type.
    ///
    /// On mismatch the error carries the actual type name of the message.
    pub fn downcast<T: AnyMessage>(self: Box<Self>) -> Result<Box<T>, &'static str> {
        let actual = self.type_name();
        self.into_any().downcast::<T>().map_err(|_| actual)
    }
}
