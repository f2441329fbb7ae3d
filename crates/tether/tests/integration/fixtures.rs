//! Shared signature table for the integration tests

use std::sync::Arc;

use tether::prelude::*;

pub struct Greeter {
    pub name: String,
}

pub struct Logger {
    pub prefix: String,
}

pub struct Mailer {
    pub logger: Arc<Logger>,
}

pub struct SmtpTransport {
    pub host: String,
}

pub struct FileTransport {
    pub path: String,
}

pub struct Notifier {
    pub transport: Instance,
}

pub struct Needy {
    pub count: i64,
}

pub struct Report {
    pub needy: Arc<Needy>,
}

pub struct Counter {
    pub base: i64,
}

pub struct Chicken;

pub struct Egg;

pub fn table() -> SignatureTable {
    let mut builder = SignatureTable::builder();
    builder
        .class(ClassInfo::new("Greeter").constructor(
            vec![ParameterSpec::new("name").typed("string").default_value("world")],
            |args| Ok(Greeter { name: args.str(0)?.to_string() }),
        ))
        .class(ClassInfo::new("Logger").constructor(
            vec![ParameterSpec::new("prefix").typed("string").default_value("log")],
            |args| Ok(Logger { prefix: args.str(0)?.to_string() }),
        ))
        .class(ClassInfo::new("Mailer").constructor(
            vec![ParameterSpec::new("logger").typed("Logger")],
            |args| Ok(Mailer { logger: args.instance::<Logger>(0)? }),
        ))
        .class(ClassInfo::interface("Transport"))
        .class(
            ClassInfo::new("SmtpTransport")
                .implements("Transport")
                .constructor(
                    vec![ParameterSpec::new("host").typed("string").default_value("localhost")],
                    |args| Ok(SmtpTransport { host: args.str(0)?.to_string() }),
                ),
        )
        .class(
            ClassInfo::new("FileTransport")
                .implements("Transport")
                .constructor(
                    vec![ParameterSpec::new("path").typed("string").default_value("/var/mail")],
                    |args| Ok(FileTransport { path: args.str(0)?.to_string() }),
                ),
        )
        .class(ClassInfo::new("Notifier").constructor(
            vec![ParameterSpec::new("transport").typed("SmtpTransport").typed("FileTransport")],
            |args| {
                let transport = args.value(0)?.as_object().cloned().ok_or_else(|| {
                    Error::build("Notifier::new needs a transport object")
                })?;
                Ok(Notifier { transport })
            },
        ))
        .class(ClassInfo::new("Needy").constructor(
            vec![ParameterSpec::new("count").typed("int")],
            |args| Ok(Needy { count: args.i64(0)? }),
        ))
        .class(ClassInfo::new("Report").constructor(
            vec![ParameterSpec::new("needy").typed("Needy")],
            |args| Ok(Report { needy: args.instance::<Needy>(0)? }),
        ))
        .class(ClassInfo::new("Orphan").constructor(
            vec![ParameterSpec::new("ghost").typed("Ghost")],
            |_| Ok(()),
        ))
        .class(ClassInfo::new("Counter").constructor(
            vec![ParameterSpec::new("base").typed("int").default_value(0)],
            |args| Ok(Counter { base: args.i64(0)? }),
        ))
        .class(
            ClassInfo::new("Vault")
                .constructor(vec![], |_| Ok(()))
                .constructor_visibility(Visibility::Private),
        )
        .class(ClassInfo::new("Opaque"))
        .class(ClassInfo::new("Chicken").constructor(
            vec![ParameterSpec::new("egg").typed("Egg")],
            |_| Ok(Chicken),
        ))
        .class(ClassInfo::new("Egg").constructor(
            vec![ParameterSpec::new("chicken").typed("Chicken")],
            |_| Ok(Egg),
        ))
        .method(MethodInfo::new(
            "Counter",
            "add",
            vec![
                ParameterSpec::new("a").typed("int"),
                ParameterSpec::new("b").typed("int").default_value(1),
            ],
            |receiver, args| {
                let counter = receiver
                    .and_then(Instance::downcast_ref::<Counter>)
                    .ok_or_else(|| Error::build("Counter::add needs a Counter"))?;
                Ok(Value::from(counter.base + args.i64(0)? + args.i64(1)?))
            },
        ))
        .method(MethodInfo::new("Counter", "zero", vec![], |_, _| Ok(Value::from(0))).static_method())
        .method(MethodInfo::new("Vault", "open", vec![], |_, _| Ok(Value::from("opened"))).static_method())
        .method(MethodInfo::new("Vault", "peek", vec![], |_, _| Ok(Value::Null)))
        .method(
            MethodInfo::new("Counter", "reset", vec![], |_, _| Ok(Value::Null))
                .visibility(Visibility::Private),
        )
        .function(FunctionInfo::new(
            "shout",
            vec![ParameterSpec::new("text").typed("string")],
            |args| Ok(Value::from(args.str(0)?.to_uppercase())),
        ))
        .function(FunctionInfo::new(
            "echo",
            vec![ParameterSpec::new("value").typed("Logger")],
            |args| Ok(args.value(0)?.clone()),
        ))
        .function(FunctionInfo::new("legacy", vec![], |_| Ok(Value::Null)).deprecated());
    builder.build()
}

pub fn container() -> Container {
    Container::new(Arc::new(table()))
}
