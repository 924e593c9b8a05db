mod scalar;

mod containers;
