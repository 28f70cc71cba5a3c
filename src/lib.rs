pub mod configuration;

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod point2d;

    pub mod function {
        pub mod function;
        pub mod rootfinding;
        pub mod polynomial;
        pub mod piecewisefunction;
        pub mod interpolation;
        pub mod affinetransform;
        pub mod secondorderode;
        pub mod trace;
        pub mod functionmanager;
    }
}
