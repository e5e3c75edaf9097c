//! xrpc-conformance - generated bindings compiled against the runtime
//!
//! The build script runs the generator over descriptors for the packages
//! below. The message types are written by hand in the shape prost would
//! produce for them, and the generated bindings are included next to them.

pub mod acme {
    pub mod common {
        pub mod v1 {
            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct Money {
                #[prost(string, tag = "1")]
                pub currency: ::prost::alloc::string::String,
                #[prost(int64, tag = "2")]
                pub units: i64,
            }
        }
    }

    pub mod greeter {
        pub mod v1 {
            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct GreetRequest {
                #[prost(string, tag = "1")]
                pub name: ::prost::alloc::string::String,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct GreetReply {
                #[prost(string, tag = "1")]
                pub message: ::prost::alloc::string::String,
            }

            pub mod greet_reply {
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Detail {
                    #[prost(uint32, tag = "1")]
                    pub length: u32,
                }
            }

            include!(concat!(env!("OUT_DIR"), "/acme/greeter/v1/greeter_xrpc.rs"));
        }
    }

    pub mod billing {
        pub mod v1 {
            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct ChargeReply {
                #[prost(string, tag = "1")]
                pub receipt: ::prost::alloc::string::String,
            }

            include!(concat!(env!("OUT_DIR"), "/acme/billing/v1/billing_xrpc.rs"));
        }
    }
}
