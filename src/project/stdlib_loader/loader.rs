use tracing::debug;

use crate::hir::{ReflectedClass, StaticClassLoader};

/// A class loader preloaded with the core `java.lang`, `java.io` and
/// `java.util` classes that analysed code most commonly names.
pub fn bootstrap_library() -> StaticClassLoader {
    let mut loader = StaticClassLoader::new();
    load_into(&mut loader);
    loader
}

/// Adds the bootstrap classes to an existing loader.
pub fn load_into(loader: &mut StaticClassLoader) {
    let before = loader.len();
    for class in java_lang().into_iter().chain(java_io()).chain(java_util()) {
        loader.insert(class);
    }
    debug!(classes = loader.len() - before, "bootstrap library loaded");
}

fn java_lang() -> Vec<ReflectedClass> {
    vec![
        ReflectedClass::builder("java.lang.Object")
            .constructor(&[])
            .method("equals", &["java.lang.Object"], "boolean")
            .method("hashCode", &[], "int")
            .method("toString", &[], "java.lang.String")
            .method("getClass", &[], "java.lang.Class")
            .build(),
        ReflectedClass::builder("java.lang.String")
            .extends("java.lang.Object")
            .implements("java.lang.CharSequence")
            .implements("java.lang.Comparable")
            .constructor(&[])
            .constructor(&["java.lang.String"])
            .constructor(&["char[]"])
            .method("length", &[], "int")
            .method("charAt", &["int"], "char")
            .method("substring", &["int"], "java.lang.String")
            .method("substring", &["int", "int"], "java.lang.String")
            .method("indexOf", &["int"], "int")
            .method("indexOf", &["java.lang.String"], "int")
            .method("equals", &["java.lang.Object"], "boolean")
            .method("isEmpty", &[], "boolean")
            .method("trim", &[], "java.lang.String")
            .method("valueOf", &["java.lang.Object"], "java.lang.String")
            .method("valueOf", &["int"], "java.lang.String")
            .build(),
        ReflectedClass::builder("java.lang.CharSequence")
            .interface()
            .method("length", &[], "int")
            .method("charAt", &["int"], "char")
            .build(),
        ReflectedClass::builder("java.lang.Comparable")
            .interface()
            .method("compareTo", &["java.lang.Object"], "int")
            .build(),
        ReflectedClass::builder("java.lang.Runnable")
            .interface()
            .method("run", &[], "void")
            .build(),
        ReflectedClass::builder("java.lang.Iterable")
            .interface()
            .method("iterator", &[], "java.util.Iterator")
            .build(),
        ReflectedClass::builder("java.lang.Number")
            .extends("java.lang.Object")
            .constructor(&[])
            .method("intValue", &[], "int")
            .method("longValue", &[], "long")
            .method("doubleValue", &[], "double")
            .build(),
        ReflectedClass::builder("java.lang.Integer")
            .extends("java.lang.Number")
            .implements("java.lang.Comparable")
            .constructor(&["int"])
            .field("MAX_VALUE", "int")
            .field("MIN_VALUE", "int")
            .method("parseInt", &["java.lang.String"], "int")
            .method("valueOf", &["int"], "java.lang.Integer")
            .method("intValue", &[], "int")
            .build(),
        ReflectedClass::builder("java.lang.Boolean")
            .extends("java.lang.Object")
            .constructor(&["boolean"])
            .field("TRUE", "java.lang.Boolean")
            .field("FALSE", "java.lang.Boolean")
            .method("booleanValue", &[], "boolean")
            .build(),
        ReflectedClass::builder("java.lang.Character")
            .extends("java.lang.Object")
            .constructor(&["char"])
            .method("isDigit", &["char"], "boolean")
            .method("isLetter", &["char"], "boolean")
            .build(),
        ReflectedClass::builder("java.lang.Class")
            .extends("java.lang.Object")
            .method("getName", &[], "java.lang.String")
            .build(),
        ReflectedClass::builder("java.lang.Math")
            .extends("java.lang.Object")
            .field("PI", "double")
            .method("abs", &["int"], "int")
            .method("abs", &["double"], "double")
            .method("max", &["int", "int"], "int")
            .method("max", &["long", "long"], "long")
            .method("max", &["double", "double"], "double")
            .build(),
        ReflectedClass::builder("java.lang.Throwable")
            .extends("java.lang.Object")
            .constructor(&[])
            .constructor(&["java.lang.String"])
            .method("getMessage", &[], "java.lang.String")
            .method("printStackTrace", &[], "void")
            .build(),
        ReflectedClass::builder("java.lang.Exception")
            .extends("java.lang.Throwable")
            .constructor(&[])
            .constructor(&["java.lang.String"])
            .build(),
        ReflectedClass::builder("java.lang.RuntimeException")
            .extends("java.lang.Exception")
            .constructor(&[])
            .constructor(&["java.lang.String"])
            .build(),
        ReflectedClass::builder("java.lang.IllegalArgumentException")
            .extends("java.lang.RuntimeException")
            .constructor(&[])
            .constructor(&["java.lang.String"])
            .build(),
        ReflectedClass::builder("java.lang.Error")
            .extends("java.lang.Throwable")
            .constructor(&[])
            .constructor(&["java.lang.String"])
            .build(),
        ReflectedClass::builder("java.lang.System")
            .extends("java.lang.Object")
            .field("out", "java.io.PrintStream")
            .field("err", "java.io.PrintStream")
            .method("currentTimeMillis", &[], "long")
            .method("exit", &["int"], "void")
            .build(),
        ReflectedClass::builder("java.lang.Thread")
            .extends("java.lang.Object")
            .implements("java.lang.Runnable")
            .constructor(&[])
            .constructor(&["java.lang.Runnable"])
            .method("start", &[], "void")
            .method("run", &[], "void")
            .build(),
    ]
}

fn java_io() -> Vec<ReflectedClass> {
    vec![
        ReflectedClass::builder("java.io.PrintStream")
            .extends("java.lang.Object")
            .method("println", &[], "void")
            .method("println", &["boolean"], "void")
            .method("println", &["char"], "void")
            .method("println", &["int"], "void")
            .method("println", &["long"], "void")
            .method("println", &["double"], "void")
            .method("println", &["java.lang.String"], "void")
            .method("println", &["java.lang.Object"], "void")
            .method("print", &["java.lang.String"], "void")
            .method("print", &["java.lang.Object"], "void")
            .build(),
        ReflectedClass::builder("java.io.IOException")
            .extends("java.lang.Exception")
            .constructor(&[])
            .constructor(&["java.lang.String"])
            .build(),
    ]
}

fn java_util() -> Vec<ReflectedClass> {
    vec![
        ReflectedClass::builder("java.util.Iterator")
            .interface()
            .method("hasNext", &[], "boolean")
            .method("next", &[], "java.lang.Object")
            .build(),
        ReflectedClass::builder("java.util.Collection")
            .interface()
            .implements("java.lang.Iterable")
            .method("size", &[], "int")
            .method("isEmpty", &[], "boolean")
            .method("add", &["java.lang.Object"], "boolean")
            .method("contains", &["java.lang.Object"], "boolean")
            .build(),
        ReflectedClass::builder("java.util.List")
            .interface()
            .implements("java.util.Collection")
            .method("get", &["int"], "java.lang.Object")
            .method("set", &["int", "java.lang.Object"], "java.lang.Object")
            .build(),
        ReflectedClass::builder("java.util.ArrayList")
            .extends("java.lang.Object")
            .implements("java.util.List")
            .constructor(&[])
            .constructor(&["int"])
            .constructor(&["java.util.Collection"])
            .build(),
        ReflectedClass::builder("java.util.Map")
            .interface()
            .inner("java.util.Map$Entry")
            .method("get", &["java.lang.Object"], "java.lang.Object")
            .method("put", &["java.lang.Object", "java.lang.Object"], "java.lang.Object")
            .method("size", &[], "int")
            .build(),
        ReflectedClass::builder("java.util.Map$Entry")
            .interface()
            .method("getKey", &[], "java.lang.Object")
            .method("getValue", &[], "java.lang.Object")
            .build(),
        ReflectedClass::builder("java.util.HashMap")
            .extends("java.lang.Object")
            .implements("java.util.Map")
            .constructor(&[])
            .constructor(&["int"])
            .build(),
    ]
}
