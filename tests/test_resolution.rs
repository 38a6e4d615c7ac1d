//! End-to-end name resolution over fixture trees.

mod common;

use common::Java;
use jsymtab::hir::{MethodSlot, Primitive};
use jsymtab::ide::ForestManager;
use jsymtab::{ClassType, MethodRef, Nameable, Symbol, SyntaxKind, VariableRef};

#[test]
fn test_inherited_method_call_resolves_to_superclass() {
    let mut forest = ForestManager::default();
    let a = Java::unit("app/A.java", |j| {
        j.class("A", |j| {
            j.method("void", "m", "m_decl", &[], |_| {});
        });
    })
    .register(&mut forest);
    let b = Java::unit("app/B.java", |j| {
        j.class_with("B", Some("A"), &[], |j| {
            j.method("void", "n", "n_decl", &[], |j| {
                j.stmt(|j| {
                    j.call("m", "m_call", |_| {});
                });
            });
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let table = query.table();
    let declared = query.definition_at(a.at("m_decl")).unwrap();
    let called = query.definition_at(b.at("m_call")).unwrap();

    assert_eq!(called, declared);
    let def = declared.declared().unwrap();
    assert_eq!(table.qualified_name(def), "app.A.m");
    assert_eq!(table.definition(def).reference_count(), 1);
}

#[test]
fn test_superclass_name_is_a_reference() {
    let mut forest = ForestManager::default();
    let a = Java::unit("app/A.java", |j| {
        j.class("A", |_| {});
    })
    .register(&mut forest);
    let b = Java::unit("app/B.java", |j| {
        j.class_with("B", Some("A"), &[], |_| {});
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let class_a = query.definition_at(a.at("A")).unwrap();
    let class_b = query.definition_at(b.at("B")).unwrap();

    let refs = query.references_at(a.at("A"));
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].target, class_a);

    let b_def = class_b.declared().unwrap();
    let data = query.table().definition(b_def).as_class().unwrap();
    assert_eq!(data.superclass, Some(ClassType::Declared(class_a.declared().unwrap())));
}

#[test]
fn test_exact_primitive_overload_wins() {
    let mut forest = ForestManager::default();
    let c = Java::unit("app/C.java", |j| {
        j.class("C", |j| {
            j.method("void", "f", "f_int", &[("int", "x")], |_| {});
            j.method("void", "f", "f_long", &[("long", "y")], |_| {});
            j.method("void", "g", "g", &[], |j| {
                j.stmt(|j| {
                    j.call("f", "call_int", |j| {
                        j.int("1");
                    });
                });
                j.stmt(|j| {
                    j.call("f", "call_long", |j| {
                        j.long("1L");
                    });
                });
                j.stmt(|j| {
                    j.call("f", "call_char", |j| {
                        j.token(SyntaxKind::CharLiteral, "'c'");
                    });
                });
            });
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let f_int = query.definition_at(c.at("f_int")).unwrap();
    let f_long = query.definition_at(c.at("f_long")).unwrap();

    assert_eq!(query.definition_at(c.at("call_int")), Some(f_int.clone()));
    assert_eq!(query.definition_at(c.at("call_long")), Some(f_long));
    // char widens to both; int is the more specific slot
    assert_eq!(query.definition_at(c.at("call_char")), Some(f_int));
}

#[test]
fn test_most_specific_reference_overload() {
    let mut forest = ForestManager::default();
    let d = Java::unit("app/D.java", |j| {
        j.class("D", |j| {
            j.method("void", "f", "f_object", &[("Object", "o")], |_| {});
            j.method("void", "f", "f_string", &[("String", "s")], |_| {});
            j.method("void", "g", "g", &[], |j| {
                j.stmt(|j| {
                    j.call("f", "call_string", |j| {
                        j.string("x");
                    });
                });
                j.stmt(|j| {
                    j.call("f", "call_this", |j| {
                        j.this();
                    });
                });
                j.stmt(|j| {
                    j.call("f", "call_null", |j| {
                        j.null();
                    });
                });
            });
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let f_object = query.definition_at(d.at("f_object")).unwrap();
    let f_string = query.definition_at(d.at("f_string")).unwrap();

    assert_eq!(query.definition_at(d.at("call_string")), Some(f_string.clone()));
    assert_eq!(query.definition_at(d.at("call_this")), Some(f_object));
    assert_eq!(query.definition_at(d.at("call_null")), Some(f_string));
}

#[test]
fn test_undeclared_name_is_unknown() {
    let mut forest = ForestManager::default();
    let e = Java::unit("app/E.java", |j| {
        j.class("E", |j| {
            j.method("void", "g", "g", &[], |j| {
                j.stmt(|j| {
                    j.mark("zork").ident("zork");
                });
                j.stmt(|j| {
                    j.call("nothing", "nothing", |_| {});
                });
            });
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let zork = query.definition_at(e.at("zork")).unwrap();
    assert!(zork.is_unknown());
    assert_eq!(zork, Symbol::unknown("zork"));
    assert!(query.definition_at(e.at("nothing")).unwrap().is_unknown());
    assert!(query.references_at(e.at("zork")).is_empty());
}

#[test]
fn test_external_member_chain() {
    let mut forest = ForestManager::default();
    let f = Java::unit("app/F.java", |j| {
        j.class("F", |j| {
            j.method("void", "g", "g", &[], |j| {
                j.stmt(|j| {
                    j.mark("system").call("System.out.println", "println", |j| {
                        j.string("hi");
                    });
                });
            });
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let table = query.table();

    let system = query.definition_at(f.at("system")).unwrap();
    assert_eq!(system.qualified_name(table), "java.lang.System");

    let println = query.definition_at(f.at("println")).unwrap();
    assert_eq!(println.qualified_name(table), "java.io.PrintStream.println");
    let Symbol::Method(method) = &println else {
        panic!("expected a method, got {println:?}");
    };
    assert_eq!(
        table.method_signature(method).params(),
        &[table.cache().string_type()]
    );
    assert!(matches!(
        method,
        MethodRef::External {
            slot: MethodSlot::Method(_),
            ..
        }
    ));
    assert_eq!(query.references_at(f.at("println")).len(), 1);
}

#[test]
fn test_single_and_on_demand_imports() {
    let mut forest = ForestManager::default();
    let g = Java::unit("src/G.java", |j| {
        j.package("app");
        j.import("java.util.List");
        j.import("java.util.*");
        j.class("G", |j| {
            j.mark("list_ty").var("List", "items", "items");
            j.mark("array_list_ty").var("ArrayList", "more", "more");
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let table = query.table();

    let list = query.definition_at(g.at("list_ty")).unwrap();
    assert_eq!(list.qualified_name(table), "java.util.List");
    // the import's last segment and the field type
    assert_eq!(query.references_at(g.at("list_ty")).len(), 2);

    let array_list = query.definition_at(g.at("array_list_ty")).unwrap();
    assert_eq!(array_list.qualified_name(table), "java.util.ArrayList");

    let class = table.class_named("app.G").unwrap();
    assert_eq!(table.qualified_name(class), "app.G");
}

#[test]
fn test_array_length() {
    let mut forest = ForestManager::default();
    let h = Java::unit("app/H.java", |j| {
        j.class("H", |j| {
            j.method("void", "g", "g", &[("int[]", "xs")], |j| {
                j.var("int", "n", "n");
                j.stmt(|j| {
                    j.assign(
                        |j| {
                            j.ident("n");
                        },
                        |j| {
                            j.node(SyntaxKind::Dot, |j| {
                                j.mark("xs_use").ident("xs");
                                j.mark("length").ident("length");
                            });
                        },
                    );
                });
            });
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    assert_eq!(
        query.definition_at(h.at("length")),
        Some(Symbol::Variable(VariableRef::ArrayLength(Box::new(
            ClassType::Primitive(Primitive::Int)
        ))))
    );
    assert_eq!(query.definition_at(h.at("xs_use")), query.definition_at(h.at("xs")));
}

#[test]
fn test_anonymous_interface_construction() {
    let mut forest = ForestManager::default();
    let i = Java::unit("app/I.java", |j| {
        j.class("I", |j| {
            j.method("void", "g", "g", &[], |j| {
                j.stmt(|j| {
                    j.new_anonymous("Runnable", "runnable", |j| {
                        j.method("void", "run", "run", &[], |_| {});
                    });
                });
            });
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let table = query.table();
    let ctor = query.definition_at(i.at("runnable")).unwrap();
    assert!(matches!(
        ctor,
        Symbol::Method(MethodRef::External {
            slot: MethodSlot::InterfaceCtor,
            ..
        })
    ));

    let run = query.definition_at(i.at("run")).unwrap().declared().unwrap();
    let anonymous = table.definition(run).parent().and_then(|s| table.scope(s).owner()).unwrap();
    let data = table.definition(anonymous).as_class().unwrap();
    assert!(data.is_anonymous);
    assert_eq!(data.superclass, Some(table.cache().object_type()));
    assert_eq!(data.interfaces.len(), 1);
    assert_eq!(data.interfaces[0].qualified_name(table), "java.lang.Runnable");
}

#[test]
fn test_break_resolves_to_label() {
    let mut forest = ForestManager::default();
    let l = Java::unit("app/L.java", |j| {
        j.class("L", |j| {
            j.method("void", "g", "g", &[], |j| {
                j.labeled("outer", "label_decl", |j| {
                    j.block(|j| {
                        j.break_to("outer", "label_use");
                    });
                });
            });
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let label = query.definition_at(l.at("label_decl")).unwrap();
    assert!(matches!(label, Symbol::Label(_)));
    assert_eq!(query.definition_at(l.at("label_use")), Some(label));
}

#[test]
fn test_inherited_field() {
    let mut forest = ForestManager::default();
    let p = Java::unit("app/P.java", |j| {
        j.class("P", |j| {
            j.var("int", "count", "count_decl");
        });
        j.class_with("Q", Some("P"), &[], |j| {
            j.method("void", "g", "g", &[], |j| {
                j.stmt(|j| {
                    j.assign(
                        |j| {
                            j.mark("count_use").ident("count");
                        },
                        |j| {
                            j.int("1");
                        },
                    );
                });
            });
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let field = query.definition_at(p.at("count_decl")).unwrap();
    assert!(matches!(field, Symbol::Variable(VariableRef::Declared(_))));
    assert_eq!(query.definition_at(p.at("count_use")), Some(field));
}

#[test]
fn test_constructor_resolution() {
    let mut forest = ForestManager::default();
    let r = Java::unit("app/R.java", |j| {
        j.class("R", |j| {
            j.ctor("R", "r_ctor", &[("int", "x")], |_| {});
        });
        j.class("T", |_| {});
        j.class("S", |j| {
            j.method("void", "g", "g", &[], |j| {
                j.stmt(|j| {
                    j.new_object("R", "new_r_int", |j| {
                        j.int("1");
                    });
                });
                j.stmt(|j| {
                    j.new_object("R", "new_r_empty", |_| {});
                });
                j.stmt(|j| {
                    j.new_object("T", "new_t", |_| {});
                });
            });
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let table = query.table();

    let ctor = query.definition_at(r.at("r_ctor")).unwrap();
    assert_eq!(query.definition_at(r.at("new_r_int")), Some(ctor));

    // the explicit constructor replaced the default one
    let class_r = query.definition_at(r.at("R")).unwrap();
    assert_eq!(query.definition_at(r.at("new_r_empty")), Some(class_r));

    let Some(Symbol::Method(MethodRef::Declared(default))) = query.definition_at(r.at("new_t")) else {
        panic!("expected the default constructor of T");
    };
    assert!(table.definition(default).is_synthetic());
    assert_eq!(table.definition(default).name(), "T");
}

#[test]
fn test_incomparable_overloads_pick_first_declared() {
    let mut forest = ForestManager::default();
    let t = Java::unit("app/T.java", |j| {
        j.class("T", |j| {
            j.method("void", "t", "t_int_long", &[("int", "a"), ("long", "b")], |_| {});
            j.method("void", "t", "t_long_int", &[("long", "c"), ("int", "d")], |_| {});
            j.method("void", "g", "g", &[], |j| {
                j.stmt(|j| {
                    j.call("t", "call", |j| {
                        j.int("1");
                        j.token(SyntaxKind::Comma, ",");
                        j.int("1");
                    });
                });
            });
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let first = query.definition_at(t.at("t_int_long")).unwrap();
    assert_eq!(query.definition_at(t.at("call")), Some(first));
}

#[test]
fn test_nearer_compatible_overload_beats_inherited_exact_one() {
    let mut forest = ForestManager::default();
    let src = Java::unit("app/Base.java", |j| {
        j.class("Base", |j| {
            j.method("void", "h", "h_int", &[("int", "x")], |_| {});
        });
        j.class_with("Derived", Some("Base"), &[], |j| {
            j.method("void", "h", "h_long", &[("long", "y")], |_| {});
            j.method("void", "g", "g", &[], |j| {
                j.stmt(|j| {
                    j.call("h", "call", |j| {
                        j.int("1");
                    });
                });
            });
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let local = query.definition_at(src.at("h_long")).unwrap();
    assert_eq!(query.definition_at(src.at("call")), Some(local));
    assert_eq!(query.references_at(src.at("h_int")).len(), 0);
}

#[test]
fn test_array_arguments() {
    let mut forest = ForestManager::default();
    let arr = Java::unit("app/Arr.java", |j| {
        j.class("Arr", |j| {
            j.method("void", "a", "a_decl", &[("Object", "o")], |_| {});
            j.method("void", "b", "b_decl", &[("Object[]", "os")], |_| {});
            j.method("void", "c", "c_decl", &[("Object[]", "more")], |_| {});
            j.method("void", "g", "g", &[("String[]", "ss"), ("int[]", "is")], |j| {
                j.stmt(|j| {
                    j.call("a", "a_call", |j| {
                        j.ident("ss");
                    });
                });
                j.stmt(|j| {
                    j.call("b", "b_call", |j| {
                        j.ident("ss");
                    });
                });
                j.stmt(|j| {
                    j.call("a", "a_prim_call", |j| {
                        j.ident("is");
                    });
                });
                j.stmt(|j| {
                    j.call("c", "c_call", |j| {
                        j.ident("is");
                    });
                });
            });
        });
    })
    .register(&mut forest);

    let query = forest.query().unwrap();
    let a = query.definition_at(arr.at("a_decl")).unwrap();
    let b = query.definition_at(arr.at("b_decl")).unwrap();

    // String[] fits both Object and Object[]
    assert_eq!(query.definition_at(arr.at("a_call")), Some(a.clone()));
    assert_eq!(query.definition_at(arr.at("b_call")), Some(b));
    // int[] is an Object but not an Object[]
    assert_eq!(query.definition_at(arr.at("a_prim_call")), Some(a));
    assert!(query.definition_at(arr.at("c_call")).unwrap().is_unknown());
    assert!(query.references_at(arr.at("c_decl")).is_empty());
}
